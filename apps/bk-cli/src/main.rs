use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use bk_app::{AppResult, analysis_service, compile, project_service};
use bk_design::OperatingMode;
use bk_project::schema::IntegratorDef;

mod export;

#[derive(Parser)]
#[command(name = "buckflow")]
#[command(about = "Buck converter simulation and loop stability analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and values
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Run a time-domain simulation
    Simulate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Integration method (overrides the project)
        #[arg(long, value_enum)]
        integrator: Option<IntegratorArg>,
        /// Model parasitic elements (overrides the project)
        #[arg(long)]
        parasitics: bool,
        /// Write the waveforms to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify the conduction mode and print duty splits
    Classify {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Recommend an inductor value
    Inductor {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Target conduction mode (defaults to the project's design section)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Allowed peak-to-peak ripple as percent of load current
        #[arg(long)]
        max_ripple: Option<f64>,
    },
    /// Sweep the loop gain and report stability margins
    Bode {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Write the sweep to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Design a Type II compensator
    DesignCompensator {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Target crossover frequency in Hz
        #[arg(long)]
        crossover: Option<f64>,
        /// Target phase margin in degrees
        #[arg(long)]
        phase_margin: Option<f64>,
        /// Store the design in the project file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Ccm,
    Dcm,
    Bcm,
}

impl From<ModeArg> for OperatingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Ccm => OperatingMode::Ccm,
            ModeArg::Dcm => OperatingMode::Dcm,
            ModeArg::Bcm => OperatingMode::Bcm,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Euler,
    Rk2,
    Rk4,
}

impl From<IntegratorArg> for IntegratorDef {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Euler => Self::Euler,
            IntegratorArg::Rk2 => Self::Rk2,
            IntegratorArg::Rk4 => Self::Rk4,
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Simulate {
            project_path,
            integrator,
            parasitics,
            output,
        } => cmd_simulate(&project_path, integrator, parasitics, output.as_deref()),
        Commands::Classify { project_path } => cmd_classify(&project_path),
        Commands::Inductor {
            project_path,
            mode,
            max_ripple,
        } => cmd_inductor(&project_path, mode.map(Into::into), max_ripple),
        Commands::Bode {
            project_path,
            output,
        } => cmd_bode(&project_path, output.as_deref()),
        Commands::DesignCompensator {
            project_path,
            crossover,
            phase_margin,
            write,
        } => cmd_design_compensator(&project_path, crossover, phase_margin, write),
    }
}

fn write_csv(csv: String, rows: usize, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        tracing::debug!(path = %path.display(), rows, "csv written");
        println!("✓ Exported {} rows to {}", rows, path.display());
    }
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let summary = project_service::summarize(&project)?;
    println!("✓ Project is valid");
    println!(
        "  {}: {:.2} V -> {:.2} V at {:.3} A, fs = {:.1} kHz, LC resonance {:.1} Hz",
        summary.name,
        summary.input_voltage,
        summary.ideal_output_voltage,
        summary.load_current,
        summary.switching_frequency / 1e3,
        summary.resonance_hz
    );
    Ok(())
}

fn cmd_simulate(
    project_path: &Path,
    integrator: Option<IntegratorArg>,
    parasitics: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    if let Some(method) = integrator {
        project.simulation.integrator = method.into();
    }
    project.simulation.include_parasitics |= parasitics;

    let run = analysis_service::project_simulation(&project)?;
    let m = &run.results.metrics;

    println!("Simulated {} samples", run.results.len());
    println!("  Average output voltage: {:.4} V", m.average_output_voltage);
    println!("  Output ripple (p-p):    {:.4} V", m.output_ripple);
    println!("  Inductor current avg:   {:.4} A", m.average_inductor_current);
    println!("  Inductor current peak:  {:.4} A", m.peak_inductor_current);
    println!("  Inductor current RMS:   {:.4} A", m.rms_inductor_current);
    println!("  Inductor ripple (p-p):  {:.4} A", m.inductor_current_ripple);
    println!(
        "  Timing: compile {:.3} ms, solve {:.3} ms",
        run.timing.compile_time_s * 1e3,
        run.timing.solve_time_s * 1e3
    );
    write_csv(export::simulation_csv(&run.results), run.results.len(), output)
}

fn cmd_classify(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let report = analysis_service::project_conduction(&project)?;
    let p = &report.parameters;

    println!("Conduction mode: {}", report.mode);
    println!(
        "  Load current {:.4} A, boundary current {:.4} A",
        report.output_current, report.boundary_current
    );
    println!("  D1 = {:.4}, D2 = {:.4}, D3 = {:.4}", p.d1, p.d2, p.d3);
    println!(
        "  Inductor current: peak {:.4} A, avg {:.4} A, RMS {:.4} A",
        p.peak_current, p.average_current, p.rms_current
    );
    println!("  Output ripple estimate: {:.4} mV", p.output_ripple * 1e3);
    Ok(())
}

fn cmd_inductor(
    project_path: &Path,
    mode: Option<OperatingMode>,
    max_ripple: Option<f64>,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let rec = analysis_service::project_inductor(&project, mode, max_ripple)?;

    println!("Inductor recommendation ({} target)", rec.target_mode);
    println!("  Boundary inductance:  {:.3} uH", rec.minimum_inductance * 1e6);
    println!("  Recommended:          {:.3} uH", rec.recommended_inductance * 1e6);
    println!("  Saturation current:   {:.3} A", rec.saturation_current);
    println!("  RMS current:          {:.3} A", rec.rms_current);
    println!(
        "  Ripple:               {:.3} A ({:.1}%) {}",
        rec.ripple_current,
        rec.ripple_percent,
        if rec.ripple_within_limit { "✓" } else { "✗" }
    );
    println!("  {}", rec.rationale);
    Ok(())
}

fn cmd_bode(project_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let run = analysis_service::project_loop(&project)?;

    match &run.compensator {
        Some(c) => println!("Compensator: {}", c),
        None => println!("Compensator: none (open-loop power stage)"),
    }
    println!("Swept {} points", run.plot.len());
    println!("Stability: {}", run.report);
    println!("  Sweep time: {:.3} ms", run.timing.solve_time_s * 1e3);
    write_csv(export::bode_csv(&run.plot), run.plot.len(), output)
}

fn cmd_design_compensator(
    project_path: &Path,
    crossover: Option<f64>,
    phase_margin: Option<f64>,
    write: bool,
) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    let network = analysis_service::project_compensator(&project, crossover, phase_margin)?;
    println!("Designed: {}", network);

    let params = compile::circuit_parameters(&project.circuit)?;
    let plot = analysis_service::sweep_bode(
        &compile::power_stage(&params),
        Some(&network),
        project.loop_analysis.start_hz,
        project.loop_analysis.end_hz,
        project.loop_analysis.points,
    )?;
    println!("Resulting loop: {}", plot.stability_report());

    if write {
        project.loop_analysis.compensator = Some(compile::compensator_def(&network));
        project.loop_analysis.target_crossover_hz = None;
        project_service::save_project(project_path, &project)?;
        println!("✓ Saved compensator to {}", project_path.display());
    }
    Ok(())
}
