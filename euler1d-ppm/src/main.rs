/**
 * @brief      Rust implementation of a PPM Godunov code to solve the 1D Euler
 *             equations.
 *
 * @copyright  Jonathan Zrake, Clemson University (2020)
 *
 * @note       Flags that control the program execution (verbosity, the output
 *             file, a parameter file) go through Clap. Model parameters, which
 *             determine the numerical result, are key=value pairs routed to
 *             lib_config. An example invocation is
 *
 *             ./euler1d-ppm --output=sod.dat problem=sod num_zones=400 cfl=0.5
 *
 *             Parameters from the command line override those read from the
 *             --config file. Set RUST_LOG=debug to log every step.
 */




// ============================================================================
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lib_config::ConfigError;
use lib_euler1d::{ExactRiemannSolver, HlleRiemannSolver, PrimitiveEigensystem, RiemannError, RiemannSolver};
use lib_hydro_algorithms::grid::{BoundaryCondition, Grid, GridError};
use lib_hydro_algorithms::reconstruction::{ReconstructionKind, UnknownReconstruction};

use euler1d_ppm::{output, Euler, EulerError, Problem, Scheme, StepError, UnknownProblem};




// ============================================================================
#[derive(Parser, Debug)]
#[command(version, about = "PPM Godunov solver for the 1D Euler equations")]
struct Opts {
    #[arg(short, long, help = "Suppress the per-iteration message")]
    quiet: bool,

    #[arg(short, long, default_value = "output.dat", help = "Output file; a .h5 extension selects HDF5")]
    output: PathBuf,

    #[arg(short, long, help = "File of key=value model parameters")]
    config: Option<PathBuf>,

    #[arg(help = "Model parameters as key=value pairs")]
    parameters: Vec<String>,
}




// ============================================================================
#[derive(thiserror::Error, Debug)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Problem(#[from] UnknownProblem),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Reconstruction(#[from] UnknownReconstruction),

    #[error("unknown Riemann solver '{0}' (expected exact or hlle)")]
    UnknownRiemannSolver(String),

    #[error("could not set up the simulation")]
    Setup(#[from] EulerError),

    #[error("the simulation failed")]
    Evolve(#[from] StepError),

    #[error("could not evaluate the exact solution")]
    ExactSolution(#[from] RiemannError),

    #[error("could not write {0}")]
    Output(PathBuf, #[source] std::io::Error),

    #[cfg(feature = "hdf5")]
    #[error("could not write HDF5 output")]
    Hdf5(#[from] hdf5::Error),

    #[cfg(not(feature = "hdf5"))]
    #[error("cannot write {0}: built without the hdf5 feature")]
    NoHdf5(PathBuf),
}




// ============================================================================
fn make_form(opts: &Opts) -> Result<lib_config::Form, ConfigError> {
    let form = lib_config::Form::new()
        .item("num_zones"      , 256_i64   , "Number of interior grid zones")
        .item("num_guard"      , 4_i64     , "Number of guard zones on each side")
        .item("cfl"            , 0.8       , "Courant number")
        .item("gamma"          , 1.4       , "Adiabatic index of the gas")
        .item("tfinal"         , 0.2       , "Time at which to stop the simulation")
        .item("problem"        , "sod"     , "Initial condition [sod|advection|uniform|acoustic|wall]")
        .item("boundary"       , "default" , "Boundary condition [default|outflow|periodic|reflecting]")
        .item("reconstruction" , "ppm"     , "Reconstruction scheme [pcm|plm|ppm]")
        .item("limit"          , true      , "Limit slopes and enforce monotone parabolas")
        .item("riemann"        , "exact"   , "Riemann solver [exact|hlle]");

    let form = match &opts.config {
        Some(path) => form.merge_string_map(lib_config::to_string_map_from_file(path)?)?,
        None => form,
    };
    form.merge_string_map(lib_config::to_string_map_from_key_val_pairs(opts.parameters.iter().cloned())?)
}

fn get_count(form: &lib_config::Form, key: &str) -> Result<usize, ConfigError> {
    usize::try_from(form.get_int(key)?).map_err(|_| ConfigError::new(key, "must be non-negative"))
}

fn make_scheme(form: &lib_config::Form) -> Result<Scheme, RunError> {
    let reconstruction: ReconstructionKind = form.get_string("reconstruction")?.parse()?;
    let riemann_solver: Box<dyn RiemannSolver> = match form.get_string("riemann")?.as_str() {
        "exact" => Box::new(ExactRiemannSolver::default()),
        "hlle"  => Box::new(HlleRiemannSolver),
        other   => return Err(RunError::UnknownRiemannSolver(other.into())),
    };
    Ok(Scheme {
        reconstruction: reconstruction.build(form.get_bool("limit")?),
        riemann_solver,
        eigensystem: Box::new(PrimitiveEigensystem),
    })
}




// ============================================================================
fn write_output(solver: &Euler, path: &Path) -> Result<(), RunError> {
    let x = solver.grid().interior_cell_centers();
    let primitive = solver.interior_primitive()?;

    if path.extension().map_or(false, |e| e == "h5") {
        #[cfg(feature = "hdf5")]
        output::write_hdf5(path, &x, &primitive, solver.time())?;

        #[cfg(not(feature = "hdf5"))]
        return Err(RunError::NoHdf5(path.to_path_buf()));
    } else {
        output::write_ascii(path, &x, &primitive).map_err(|e| RunError::Output(path.to_path_buf(), e))?;
    }
    info!("wrote {}", path.display());
    Ok(())
}

fn report_error_norm(solver: &Euler, problem: Problem) -> Result<(), RunError> {
    let g = solver.gamma_law_index();
    let dx = solver.grid().dx();
    let x = solver.grid().interior_cell_centers();
    let primitive = solver.interior_primitive()?;
    let mut l1 = 0.0;

    for (&x, q) in x.iter().zip(primitive.iter()) {
        match problem.exact_solution(x, solver.time(), g)? {
            Some(exact) => l1 += (q.density - exact.density).abs() * dx,
            None => return Ok(()),
        }
    }
    info!("L1 density error = {:.6e}", l1);
    Ok(())
}




// ============================================================================
fn run(opts: Opts) -> Result<(), RunError> {
    let form = make_form(&opts)?;

    if !opts.quiet {
        for (key, parameter) in &form {
            println!("\t{:.<24} {: <8} {}", key, parameter.value, parameter.about);
        }
    }

    let problem: Problem = form.get_string("problem")?.parse()?;
    let boundary = match form.get_string("boundary")?.as_str() {
        "default" => problem.boundary(),
        other => other.parse::<BoundaryCondition>()?,
    };
    let gamma_law_index = form.get_float("gamma")?;
    let tfinal = form.get_float("tfinal")?;
    let num_zones = get_count(&form, "num_zones")?;
    let grid = Grid::new(num_zones, get_count(&form, "num_guard")?, Problem::DOMAIN, boundary)?;

    if boundary != problem.boundary() {
        warn!("running {:?} with {:?} boundaries instead of {:?}", problem, boundary, problem.boundary());
    }

    let mut solver = Euler::new(
        grid,
        form.get_float("cfl")?,
        gamma_law_index,
        make_scheme(&form)?,
        |x| problem.primitive(x, gamma_law_index))?;

    let initial_totals = solver.totals();
    let start_program = Instant::now();
    let mut start = Instant::now();

    solver.evolve_with(tfinal, |report| {
        if !opts.quiet {
            println!("[{:05}] t={:.4} dt={:.3e} kzps={:.3}", report.iteration, report.time, report.dt, (num_zones as f64) * 1e-3 / start.elapsed().as_secs_f64());
        }
        start = Instant::now();
    })?;

    info!("mean kzps = {:.3}", (num_zones as f64) * 1e-3 * (solver.iteration() as f64) / start_program.elapsed().as_secs_f64());

    let totals = solver.totals() - initial_totals;
    info!("change in totals: mass {:+.3e} momentum {:+.3e} energy {:+.3e}", totals.density, totals.momentum, totals.energy);

    report_error_norm(&solver, problem)?;
    write_output(&solver, &opts.output)
}




// ============================================================================
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();

            while let Some(cause) = source {
                message.push_str(&format!(": {}", cause));
                source = cause.source();
            }
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}
