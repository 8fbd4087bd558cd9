use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chronarc_clock::app::ClockApp;
use chronarc_clock::config::{find_font, Cli};
use chronarc_clock::debug::Debug;
use chronarc_clock::scenario::Scenario;
use chronarc_engine::logging::{init_logging, LoggingConfig};
use chronarc_ui::Application;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..Default::default() });

    let params = cli.scene_params()?;
    let (width, height) = (cli.width as f32, cli.height as f32);
    let scenario = match cli.seed {
        Some(seed) => Scenario::new(width, height, &mut StdRng::seed_from_u64(seed)),
        None => Scenario::new(width, height, &mut rand::rng()),
    };
    let mut scenario = scenario.with_params(params);

    let mut debug = Debug::from_fragment(cli.fragment());
    debug.select_timezone(cli.timezone);

    for (field, value) in cli.time_fields() {
        scenario
            .set_time_field(field, value, debug.timezone())
            .with_context(|| format!("invalid --{field}"))?;
    }

    let font = match find_font(cli.font.as_deref()) {
        Some(path) => Some(
            std::fs::read(&path).with_context(|| format!("failed to read font {}", path.display()))?,
        ),
        None => {
            log::warn!("no font found; readout and panel labels are disabled");
            None
        }
    };

    log::info!(
        "chronarc {}x{} timezone={} debug={} override={:?}",
        cli.width,
        cli.height,
        debug.timezone_name(),
        debug.is_active(),
        scenario.time_override(),
    );

    let mut app = Application::new().title("chronarc").size(cli.width, cli.height);
    if let Some(bytes) = font {
        app = app.font("body", bytes);
    }
    app.run(move |fonts| {
        let body = fonts.get("body");
        ClockApp::new(scenario.with_font(body), debug, body)
    })
}
