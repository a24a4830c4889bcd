//! The command line runner: parse a scenario from disk, solve it, print the
//! plan.

use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use fnv::FnvHashMap;
use plan_format::ActionLibrary;
use plan_format::LiteralSpec;
use plan_format::UsageTag;

use crate::basic_types::Clause;
use crate::basic_types::EntityId;
use crate::basic_types::Literal;
use crate::engine::termination::Indefinite;
use crate::engine::termination::OsSignal;
use crate::engine::termination::TerminationCondition;
use crate::engine::termination::TimeBudget;
use crate::engine::GoalPlanner;
use crate::model::Model;
use crate::options::PlannerOptions;
use crate::predicates::Predicate;
use crate::predicates::Usage;
use crate::results::PlanningResult;
use crate::statistics::configure;
use crate::world::WorldStatement;

#[derive(Debug, Parser)]
#[command(name = "goblin")]
struct Cli {
    /// The direction in which to search.
    #[arg(long, value_enum)]
    mode: Mode,

    /// The action library file.
    #[arg(long)]
    actions: PathBuf,

    /// The world statement file describing the initial world.
    #[arg(long)]
    initial: PathBuf,

    /// The world statement file describing the goal.
    #[arg(long)]
    goal: PathBuf,

    /// The maximum plan length to consider.
    #[arg(long, default_value_t = 10)]
    depth: u32,

    /// The number of seconds the planner is allowed to run.
    #[arg(long)]
    time_out: Option<u64>,

    /// The file path to which the search trace is written.
    ///
    /// If no path is provided, the trace is not written.
    #[arg(long)]
    trace: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Forward,
    Backward,
}

/// Run the planner CLI. Exit codes: 0 when a plan was found, 1 when no plan
/// exists within the depth limit (or the search was stopped), 2 on malformed
/// input.
pub fn run() -> ExitCode {
    env_logger::init();
    configure(true, "%% ");

    let args = Cli::parse();

    match try_run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::from(2)
        }
    }
}

fn try_run(args: Cli) -> anyhow::Result<ExitCode> {
    let library = read_action_library(&args.actions)?;

    let mut model = Model::default();
    let mut predicates: FnvHashMap<String, Predicate> = FnvHashMap::default();

    for declaration in &library.predicates {
        let predicate = model
            .new_symbol(declaration.name.as_str(), usage(declaration.usage))
            .with_context(|| format!("Failed to register predicate `{}`", declaration.name))?;
        let _ = predicates.insert(declaration.name.clone(), predicate);
    }

    for declaration in &library.actions {
        let source = model.new_entity(declaration.source.as_str());
        let target = declaration
            .target
            .as_ref()
            .map(|name| model.new_entity(name.as_str()));

        let prerequisites = clause_from_specs(&predicates, &declaration.prerequisites)
            .with_context(|| format!("In the prerequisites of `{}`", declaration.name))?;
        let consequences = clause_from_specs(&predicates, &declaration.consequences)
            .with_context(|| format!("In the consequences of `{}`", declaration.name))?;

        model
            .new_action(
                declaration.name.as_str(),
                source,
                target,
                [prerequisites],
                [consequences],
            )
            .with_context(|| format!("Failed to construct action `{}`", declaration.name))?;
    }

    let initial = read_world(&args.initial, &predicates, &mut model)?;
    let goal = read_world(&args.goal, &predicates, &mut model)?;

    let mut planner = model.into_planner(PlannerOptions::default());

    let mut termination: Box<dyn TerminationCondition> = match args.time_out {
        Some(seconds) => Box::new(TimeBudget::starting_now(Duration::from_secs(seconds))),
        None => match OsSignal::install() {
            Ok(signal) => Box::new(signal),
            Err(_) => Box::new(Indefinite),
        },
    };

    let result = match args.mode {
        Mode::Forward => planner.solve_forward(&initial, &goal, args.depth, &mut termination),
        Mode::Backward => planner.solve_backward(&initial, &goal, args.depth, &mut termination),
    };

    planner.log_statistics();

    if let Some(path) = &args.trace {
        write_trace(&planner, path)?;
    }

    let code = match result {
        PlanningResult::Planned(plan) => {
            for (position, action) in plan.actions().iter().enumerate() {
                println!("{}. {}", position + 1, action.name());
            }
            println!("==========");
            ExitCode::SUCCESS
        }
        PlanningResult::NoPlan { depth_limited } => {
            if depth_limited {
                println!("NO PLAN (depth limit reached)");
            } else {
                println!("NO PLAN");
            }
            ExitCode::from(1)
        }
        PlanningResult::Unknown => {
            println!("UNKNOWN");
            ExitCode::from(1)
        }
    };

    Ok(code)
}

fn read_action_library(path: &Path) -> anyhow::Result<ActionLibrary> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;

    plan_format::parse_action_library(&source)
        .with_context(|| format!("Failed to parse action library from {}", path.display()))
}

fn read_world(
    path: &Path,
    predicates: &FnvHashMap<String, Predicate>,
    model: &mut Model,
) -> anyhow::Result<WorldStatement> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;

    let declaration = plan_format::parse_world_statement(&source)
        .with_context(|| format!("Failed to parse world statement from {}", path.display()))?;

    let mut parts: Vec<(Clause, Option<EntityId>, Option<EntityId>)> = Vec::new();
    for part in &declaration.parts {
        let clause = clause_from_specs(predicates, &part.literals)
            .with_context(|| format!("In {}", path.display()))?;
        let source = part.source.as_ref().map(|name| model.new_entity(name.as_str()));
        let target = part.target.as_ref().map(|name| model.new_entity(name.as_str()));
        parts.push((clause, source, target));
    }

    WorldStatement::from_parts(parts)
        .with_context(|| format!("Ill-formed world statement in {}", path.display()))
}

fn clause_from_specs(
    predicates: &FnvHashMap<String, Predicate>,
    specs: &[LiteralSpec],
) -> anyhow::Result<Clause> {
    let mut literals = Vec::with_capacity(specs.len());

    for spec in specs {
        let predicate = predicates
            .get(&spec.predicate)
            .copied()
            .with_context(|| format!("Unknown predicate `{}`", spec.predicate))?;
        literals.push(Literal::new(predicate, spec.value));
    }

    Clause::new(literals).context("The literals bind a predicate both ways")
}

fn write_trace(planner: &GoalPlanner, path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create trace file {}", path.display()))?;

    planner
        .trace()
        .write_to(&mut file)
        .with_context(|| format!("Failed to write trace to {}", path.display()))
}

fn usage(tag: UsageTag) -> Usage {
    match tag {
        UsageTag::Source => Usage::Source,
        UsageTag::Target => Usage::Target,
        UsageTag::Both => Usage::Both,
    }
}
