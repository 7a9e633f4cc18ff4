use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
};

use fabric::{
    AccelIntegrator, Fabric, FrameExchange, ImpulseIntegrator, World,
    event_loop::run_sim_loop,
    presets::{self, IntegratorKind},
    ui::{BodyDescriptor, FabricApp},
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene = match std::env::args().nth(1).as_deref() {
        Some("star") => presets::star_system(),
        Some("debris") => presets::random_debris(24),
        Some(other) => anyhow::bail!("unknown scene {other:?}, expected \"star\" or \"debris\""),
        None => presets::three_body_dance(),
    };

    let bodies: Vec<_> = scene.objects.iter().map(|o| o.body.clone()).collect();
    let descriptors: Vec<BodyDescriptor> = scene.objects.iter().map(Into::into).collect();
    let fabric = Fabric::with_params(bodies.len(), scene.fabric);
    let points = scene.grid.points();

    let exchange = Arc::new(FrameExchange::new(bodies.len(), points.len(), scene.delta));
    let token = Arc::new(AtomicBool::new(false));
    let (cmd_tx, cmd_rx) = mpsc::channel();

    let handle = {
        let exchange = exchange.clone();
        let token = token.clone();
        match scene.integrator {
            IntegratorKind::Impulse => {
                let world = World::with_fabric(bodies, ImpulseIntegrator::new(), fabric);
                thread::spawn(move || run_sim_loop(world, points, exchange, cmd_rx, token))
            }
            IntegratorKind::Accel => {
                let world = World::with_fabric(bodies, AccelIntegrator, fabric);
                thread::spawn(move || run_sim_loop(world, points, exchange, cmd_rx, token))
            }
        }
    };

    let app = FabricApp::new(
        exchange,
        cmd_tx,
        scene.grid.clone(),
        descriptors,
        scene.spawn_mass,
    );
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "space-time fabric",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("window loop failed: {err}"))?;

    token.store(true, Ordering::Relaxed);
    log::info!("waiting for simulation thread to stop");
    handle.join().expect("simulation thread panicked");
    Ok(())
}
