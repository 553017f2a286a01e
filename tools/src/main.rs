//! risk-runner: headless runner for the CorePay Risk Desk.
//!
//! Usage:
//!   risk-runner --seed 42 --ticks 100 --export alerts.csv
//!   risk-runner --connect 127.0.0.1:9000
//!   risk-runner --ipc-mode

use anyhow::Result;
use corepay_core::{
    command::OperatorCommand,
    config::MonitorConfig,
    engine::MonitorEngine,
    event::EventPayload,
    event::InboundMessage,
    source::{EventSource, LiveSource, SimulatedSource},
};
use std::env;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;

/// One line of IPC input: either a control request, an injected live
/// event, or an operator command.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IpcLine {
    Control(IpcControl),
    Command(OperatorCommand),
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcControl {
    GetState,
    Tick {
        count: u64,
    },
    Event {
        #[serde(default)]
        payload: Option<EventPayload>,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 100u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");
    let connect = str_arg(&args, "--connect");
    let export_path = str_arg(&args, "--export");

    let mut config = match str_arg(&args, "--config") {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if connect.is_some() {
        config.server_endpoint = connect.map(str::to_string);
    }

    if !ipc_mode {
        println!("CorePay Risk Desk — risk-runner");
        println!("  seed:     {seed}");
        println!("  ticks:    {ticks}");
        println!("  endpoint: {}", config.server_endpoint.as_deref().unwrap_or("(simulated)"));
        println!();
    }

    let mut engine = MonitorEngine::build(config.clone(), seed);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
        return Ok(());
    }

    match config.server_endpoint.as_deref() {
        Some(endpoint) => match TcpStream::connect(endpoint) {
            Ok(stream) => {
                log::info!("connected to {endpoint}");
                run_live(&mut engine, stream)?;
            }
            Err(e) => {
                // Setup failure means "no live source available".
                log::warn!("live channel setup failed: {e}");
                if config.simulation_enabled {
                    run_simulated(&mut engine, ticks, realtime)?;
                }
            }
        },
        None if config.simulation_enabled => {
            run_simulated(&mut engine, ticks, realtime)?;
        }
        None => {
            log::warn!("no event source configured; nothing to do");
        }
    }

    print_summary(&engine);
    if let Some(path) = export_path {
        engine.export_alerts(Some(path))?;
        println!("exported alerts to {path}");
    }
    Ok(())
}

fn run_simulated(engine: &mut MonitorEngine, ticks: u64, realtime: bool) -> Result<()> {
    let interval = engine.config().tick_interval_ms;
    if engine.config().seed_demo_data {
        engine.seed_demo_data();
    }
    let mut source = SimulatedSource::start(engine);
    for _ in 0..ticks {
        source.pump(engine)?;
        if realtime {
            std::thread::sleep(std::time::Duration::from_millis(interval));
        }
    }
    engine.stop_simulator();
    Ok(())
}

fn run_live(engine: &mut MonitorEngine, stream: TcpStream) -> Result<()> {
    // A dropped connection ends the session — no simulator fallback.
    let mut source = LiveSource::new(BufReader::new(stream));
    while source.pump(engine)? {}
    Ok(())
}

fn run_ipc_loop(engine: &mut MonitorEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let line: IpcLine = match serde_json::from_str(&buffer) {
            Ok(l) => l,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match line {
            IpcLine::Control(IpcControl::Quit) => break,
            IpcLine::Control(IpcControl::GetState) => {}
            IpcLine::Control(IpcControl::Tick { count }) => {
                engine.start_simulator();
                for _ in 0..count {
                    engine.simulator_tick();
                }
            }
            IpcLine::Control(IpcControl::Event { payload }) => {
                engine.apply_inbound(InboundMessage::Event { payload });
            }
            IpcLine::Command(command) => {
                engine.apply(command)?;
            }
        }

        let snapshot = engine.snapshot();
        writeln!(stdout, "{}", serde_json::to_string(&snapshot)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &MonitorEngine) {
    let summary = engine.summary();
    println!("=== SESSION SUMMARY ===");
    println!("  overall score:  {}", summary.overall);
    println!("  trend:          {}", summary.trend);
    println!("  24h average:    {}", summary.avg_24h);
    println!("  alerts (24h):   {}", summary.alerts_24h);
    println!("  blocked:        {}", summary.blocked);
    println!("  active alerts:  {}", summary.active);
    println!("  feed size:      {}", engine.alerts().len());
    println!("  series points:  {}", engine.series().len());
    if let Some(last) = engine.last_update() {
        println!("  last update:    {last}");
    }

    println!();
    println!("=== CATEGORY COUNTS ===");
    for (category, count) in engine.alerts().category_counts() {
        println!("  {category:<10} {count}");
    }

    println!();
    println!("=== NEWEST ALERTS ===");
    for alert in engine.alerts().iter().take(10) {
        println!(
            "  [{}] {} risk {:>3} {} {}",
            if alert.handled { "x" } else { " " },
            alert.category,
            alert.risk,
            alert.entity,
            if alert.auto_blocked { "(blocked)" } else { "" },
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
