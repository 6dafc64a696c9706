use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use swing_overlay::{
    FrameIndex, OverlayOpts, OverlaySession, PlaybackTransport as _, Report, SeverityTier,
    SimulatedTransport, Size, StepStatus, main_problem, step_statuses,
};

#[derive(Parser, Debug)]
#[command(name = "swing-overlay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the report's problems and per-step outcomes as JSON.
    Problems(ProblemsArgs),
    /// Print the draw descriptors for a single frame as JSON.
    Frame(FrameArgs),
    /// Simulate playback and print one JSON line per emitted frame.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ProblemsArgs {
    /// Input report JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(clap::Args, Debug)]
struct ViewArgs {
    /// Native video width in pixels.
    #[arg(long)]
    width: f64,

    /// Native video height in pixels.
    #[arg(long)]
    height: f64,

    /// Container width in pixels.
    #[arg(long)]
    container: f64,

    /// Problem to visualize (`IssueName`); defaults to the first problem.
    #[arg(long)]
    problem: Option<String>,

    /// Hide the per-frame skeleton.
    #[arg(long, default_value_t = false)]
    no_skeleton: bool,

    /// Hide problem guidelines.
    #[arg(long, default_value_t = false)]
    no_guidelines: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input report JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Resolve every frame from 0 first, as continuous playback would.
    #[arg(long, default_value_t = false)]
    replay: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input report JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop after this much simulated wall time, in seconds.
    #[arg(long)]
    until: f64,

    /// Simulated wall time between clock ticks, in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step_secs: f64,

    /// Playback rate (clamped to 0.25..=2.0).
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// Media duration in seconds; playback loops from the first step when reached.
    #[arg(long)]
    duration: Option<f64>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(serde::Serialize)]
struct ProblemRow<'a> {
    issue_name: &'a str,
    severity: u32,
    tier: SeverityTier,
    score: f64,
    step_id: u32,
    guidelines: &'a [String],
}

#[derive(serde::Serialize)]
struct ProblemsOut<'a> {
    main_problem: Option<&'a str>,
    problems: Vec<ProblemRow<'a>>,
    steps: Vec<StepStatus>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swing_overlay=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Problems(args) => cmd_problems(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load(path: &Path) -> anyhow::Result<Report> {
    let report =
        Report::from_path(path).with_context(|| format!("load report '{}'", path.display()))?;
    report
        .validate()
        .with_context(|| format!("validate report '{}'", path.display()))?;
    Ok(report)
}

fn session(report: Report, view: &ViewArgs) -> anyhow::Result<OverlaySession> {
    let opts = OverlayOpts {
        show_guidelines: !view.no_guidelines,
        show_skeleton: !view.no_skeleton,
        ..OverlayOpts::default()
    };
    Ok(OverlaySession::new(report, view.problem.as_deref(), opts)?)
}

fn cmd_problems(args: ProblemsArgs) -> anyhow::Result<()> {
    let report = load(&args.in_path)?;
    let problems = &report.analysis.problems;
    let out = ProblemsOut {
        main_problem: main_problem(problems).map(|p| p.issue_name.as_str()),
        problems: problems
            .iter()
            .map(|p| ProblemRow {
                issue_name: &p.issue_name,
                severity: p.severity,
                tier: SeverityTier::from_severity(p.severity),
                score: p.score,
                step_id: p.step_id.0,
                guidelines: &p.guidelines,
            })
            .collect(),
        steps: step_statuses(&report.analysis.steps, problems),
    };
    let json = serde_json::to_string_pretty(&out).context("encode problems")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let report = load(&args.in_path)?;
    let mut sess = session(report, &args.view)?;
    let viewport = sess.viewport(
        Size::new(args.view.width, args.view.height),
        args.view.container,
    )?;

    if args.replay {
        for f in 0..args.frame {
            sess.on_frame(FrameIndex(f), &viewport);
        }
    }
    let out = sess.on_frame(FrameIndex(args.frame), &viewport);

    let json = serde_json::to_string_pretty(&out).context("encode frame output")?;
    println!("{json}");
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !args.step_secs.is_finite() || args.step_secs <= 0.0 {
        anyhow::bail!("--step-secs must be finite and > 0");
    }
    let report = load(&args.in_path)?;
    let mut sess = session(report, &args.view)?;
    let dims = Size::new(args.view.width, args.view.height);
    let viewport = sess.viewport(dims, args.view.container)?;

    let mut transport = SimulatedTransport::new(dims);
    if let Some(d) = args.duration {
        transport = transport.with_duration(d);
    }
    let delta = args.rate - transport.playback_rate();
    swing_overlay::adjust_speed(&mut transport, delta);
    sess.clock().align_start(&mut transport);
    transport.play();
    sess.clock_mut().start();

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let mut elapsed = 0.0;
    while elapsed <= args.until && sess.clock().is_running() {
        if let Some(out) = sess.poll(&mut transport, &viewport) {
            let line = serde_json::to_string(&out).context("encode frame output")?;
            writeln!(stdout, "{line}").context("write stdout")?;
        }
        transport.advance(args.step_secs);
        elapsed += args.step_secs;
    }
    tracing::debug!(elapsed, "playback simulation finished");
    Ok(())
}
