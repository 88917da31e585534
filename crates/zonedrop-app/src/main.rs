//! Native entry point: replays a scripted drag session.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting ZoneDrop demo");

    let report = zonedrop_app::demo::run();
    log::info!(
        "Grid holds {} element(s){}, free zone holds {}",
        report.grid_children,
        if report.grid_overflows { " and scrolls" } else { "" },
        report.free_children
    );
    if let Some(error) = report.error {
        log::error!("Error slot: {}", error);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
