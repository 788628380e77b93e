use clap::Args;
use scenario_ranking::config::AppConfig;
use scenario_ranking::error::AppError;
use scenario_ranking::forsys::{
    ForsysHeaders, ForsysRawOutput, ForsysTable, Scenario, ScenarioSetResult, WeightedPriorities,
};
use serde_json::Value;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScenariosArgs {
    /// Project output table exported by the ranking engine
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Priority the engine ran with; repeat in engine order
    #[arg(long = "priority", required = true)]
    pub(crate) priorities: Vec<String>,
    /// Weight per priority. When given, every row belongs to one scenario;
    /// otherwise rows are grouped by the weights the engine reports.
    #[arg(long = "weight")]
    pub(crate) weights: Vec<f64>,
    /// Print a ranked summary instead of JSON
    #[arg(long)]
    pub(crate) summary: bool,
}

pub(crate) fn run_scenarios(args: ScenariosArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let table = ForsysTable::from_csv_reader(File::open(&args.csv)?)?;
    let raw = ForsysRawOutput::from_project_output(table);

    let output = reshape(&raw, &args, &config.forsys.headers())?;
    if args.summary {
        render_summary(&output);
    } else {
        println!("{}", render_json(&output)?);
    }
    Ok(())
}

pub(crate) enum ScenarioOutput {
    Set(ScenarioSetResult),
    Single(Scenario),
}

impl ScenarioOutput {
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            ScenarioOutput::Set(set) => serde_json::to_value(set),
            ScenarioOutput::Single(scenario) => serde_json::to_value(scenario),
        }
    }
}

fn render_json(output: &ScenarioOutput) -> Result<String, AppError> {
    output
        .to_json()
        .and_then(|value| serde_json::to_string_pretty(&value))
        .map_err(json_error)
}

fn json_error(error: serde_json::Error) -> AppError {
    AppError::from(std::io::Error::from(error))
}

pub(crate) fn reshape(
    raw: &ForsysRawOutput,
    args: &ScenariosArgs,
    headers: &ForsysHeaders,
) -> Result<ScenarioOutput, AppError> {
    if args.weights.is_empty() {
        let set = ScenarioSetResult::from_raw_output(raw, &args.priorities, headers)?;
        return Ok(ScenarioOutput::Set(set));
    }

    let weighted = WeightedPriorities::new(args.priorities.clone(), args.weights.clone())?;
    let scenario = Scenario::from_raw_output(raw, &weighted, headers)?;
    Ok(ScenarioOutput::Single(scenario))
}

fn render_summary(output: &ScenarioOutput) {
    match output {
        ScenarioOutput::Set(set) => {
            println!("{} scenario(s)", set.len());
            for (key, scenario) in set.iter() {
                println!("\nScenario {key}");
                render_scenario(scenario);
            }
        }
        ScenarioOutput::Single(scenario) => render_scenario(scenario),
    }
}

fn render_scenario(scenario: &Scenario) {
    let rows = scenario
        .ranked_projects()
        .iter()
        .zip(scenario.cumulative_ranked_project_area())
        .zip(scenario.cumulative_ranked_project_cost());
    for ((project, area), cost) in rows {
        println!(
            "- rank {} | project {} | score {:.3} | cumulative area {:.1} | cumulative cost {:.2}",
            project.rank(),
            project.id(),
            project.total_score(),
            area,
            cost
        );
    }
    if !scenario.ranks_ascending() {
        println!("  note: engine rows were not in rank order");
    }
}
