//! # Demo Binary Entry Point
//!
//! Runs two sync sessions against the in-memory loopback transport so the
//! whole pipeline can be watched from the logs.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin demo
//! cargo run --bin demo -- --ticks 50 --config config/sync.toml
//! ```
//!
//! The demo will:
//! 1. Register a host and a guest endpoint on a shared memory hub
//! 2. Wait (1-second poll) until both local peer ids are displayed
//! 3. Connect the guest to the host through the UI binder path
//! 4. Random-walk the guest's pose and broadcast it once per tick
//! 5. Log the host-side proxy following the guest with the 0.3 blend

use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use rand::Rng;
use std::io::Write;
use std::time::Duration;

use peersync::common::config::SyncConfig;
use peersync::scene::{PlayerPose, ProxyHandle, Scene, Vec3};
use peersync::session::SyncSession;
use peersync::transport::memory::MemoryHub;
use peersync::ui::{UiBinder, UiEvent, UiSurface};

/// Command-line arguments for the demo binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How many pose broadcasts the guest performs
    #[arg(long, default_value_t = 30)]
    ticks: u32,

    /// Optional path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,
}

/// Initialize the logging system with timestamp, level, and message
/// formatting. Logs are printed to stdout with INFO level by default.
fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .init();
}

/// Scene implementation that logs every proxy mutation.
struct LogScene {
    name: &'static str,
    next_handle: u64,
}

impl LogScene {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            next_handle: 0,
        }
    }
}

impl Scene for LogScene {
    fn add_proxy(&mut self, position: Vec3, rotation_y: f32) -> ProxyHandle {
        let handle = ProxyHandle(self.next_handle);
        self.next_handle += 1;
        info!(
            "[{}] proxy {:?} spawned at ({:.2}, {:.2}, {:.2}) ry={:.2}",
            self.name, handle, position.x, position.y, position.z, rotation_y
        );
        handle
    }

    fn set_proxy_pose(&mut self, handle: ProxyHandle, position: Vec3, rotation_y: f32) {
        info!(
            "[{}] proxy {:?} -> ({:.2}, {:.2}, {:.2}) ry={:.2}",
            self.name, handle, position.x, position.y, position.z, rotation_y
        );
    }

    fn remove_proxy(&mut self, handle: ProxyHandle) {
        info!("[{}] proxy {:?} removed", self.name, handle);
    }
}

/// Surface implementation backed by plain log lines; the "input box" is a
/// string the demo fills in before clicking connect.
#[derive(Default)]
struct LogSurface {
    installed: bool,
    input: String,
}

impl UiSurface for LogSurface {
    fn menu_installed(&self) -> bool {
        self.installed
    }

    fn install_menu(&mut self) {
        self.installed = true;
        info!("🧩 Multiplayer menu installed");
    }

    fn show_menu(&mut self) {
        info!("🧩 Menu shown");
    }

    fn hide_menu(&mut self) {
        info!("🧩 Menu hidden");
    }

    fn read_target_input(&self) -> String {
        self.input.clone()
    }

    fn alert(&mut self, message: &str) {
        info!("🔔 ALERT: {}", message);
    }

    fn set_local_id_label(&mut self, id: &str) {
        info!("🧩 Local id label set to {}", id);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };

    let hub = MemoryHub::new();
    let (host_transport, mut host_events) = hub.endpoint();
    let (guest_transport, mut guest_events) = hub.endpoint();

    let mut host = SyncSession::with_config(Box::new(host_transport), &config);
    let mut guest = SyncSession::with_config(Box::new(guest_transport), &config);
    let mut host_scene = LogScene::new("host");
    let mut guest_scene = LogScene::new("guest");

    let mut host_surface = LogSurface::default();
    let mut guest_surface = LogSurface::default();
    let mut host_binder = UiBinder::new();
    let mut guest_binder = UiBinder::new();
    host_binder.ensure_installed(&mut host_surface);
    guest_binder.ensure_installed(&mut guest_surface);

    // Poll until both ids are assigned and displayed, as the real UI does.
    let mut poll = tokio::time::interval(Duration::from_secs(config.id_poll_interval_secs));
    loop {
        poll.tick().await;
        host.drain_events(&mut host_scene, &mut host_events);
        guest.drain_events(&mut guest_scene, &mut guest_events);
        let host_done = host_binder.poll_local_id(&mut host_surface, &host);
        let guest_done = guest_binder.poll_local_id(&mut guest_surface, &guest);
        if host_done && guest_done {
            break;
        }
    }

    // Guest opens the menu, types the host id and clicks connect.
    let host_id = host
        .local_id()
        .map(str::to_string)
        .unwrap_or_default();
    guest_binder.handle_event(&mut guest_surface, &mut guest, UiEvent::OpenMenuClicked);
    guest_surface.input = host_id;
    guest_binder.handle_event(&mut guest_surface, &mut guest, UiEvent::ConnectClicked);

    let mut rng = rand::thread_rng();
    let mut pose = PlayerPose::default();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    for _ in 0..args.ticks {
        ticker.tick().await;

        pose.position.x += rng.gen_range(-0.5..0.5);
        pose.position.z += rng.gen_range(-0.5..0.5);
        pose.rotation_y += rng.gen_range(-0.2..0.2);

        guest.drain_events(&mut guest_scene, &mut guest_events);
        guest.tick(&pose);
        host.drain_events(&mut host_scene, &mut host_events);
    }

    info!("Demo finished, shutting the sessions down");
    guest.shutdown();
    host.drain_events(&mut host_scene, &mut host_events);
    guest.drain_events(&mut guest_scene, &mut guest_events);
    host.shutdown();

    Ok(())
}
