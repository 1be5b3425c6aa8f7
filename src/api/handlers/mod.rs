// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod metrics;
mod router;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use router::{
    create_backup, hotspot_profiles, interfaces, ppp_connections, public_ip, reboot_router,
    restart_hotspot, router_status, test_connection, test_ddns,
};
