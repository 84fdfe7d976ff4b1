//! Command line access to the kernel's stateless operations

use anyhow::{bail, Context, Result};
use kalkul::json::TableauxStateJson;
use kalkul::{
    formula_to_cnf, parse_formula, Calculus, CnfStrategy, KernelConfig, PropositionalTableaux,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: kalkul <command> [args] [options]

Commands:
  parse <formula>          Print the initial tableaux state
  move <state> <move>      Apply a JSON move such as {\"type\":\"e\",\"id1\":0,\"id2\":0}
  close <state>            Check whether every branch is closed
  show <state>             Print the state as JSON
  cnf <formula>            Print the clause set of an infix formula

Options:
  --config <file>          Kernel configuration (TOML)
  --strategy <name>        CNF strategy: naive, tseytin or optimal
  --params <json>          Tableaux parameters for parse";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut positional: Vec<&str> = Vec::new();
    let mut config_path: Option<&str> = None;
    let mut strategy: Option<CnfStrategy> = None;
    let mut params: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => config_path = Some(option_value(args, i)?),
            "--strategy" => {
                let name = option_value(args, i)?;
                strategy = Some(
                    serde_json::from_value(serde_json::Value::String(name.to_string()))
                        .with_context(|| format!("Unknown CNF strategy '{}'", name))?,
                );
            }
            "--params" => params = Some(option_value(args, i)?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => {
                positional.push(other);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    let mut config = match config_path {
        Some(path) => KernelConfig::load(path)?,
        None => KernelConfig::default(),
    };
    if let Some(strategy) = strategy {
        config.cnf_strategy = strategy;
    }
    let calculus = PropositionalTableaux::from_config(&config)?;

    match positional.as_slice() {
        ["parse", formula] => println!("{}", calculus.parse(formula, params)?),
        ["move", state, mv] => println!("{}", calculus.apply_move_str(state, mv)?),
        ["close", state] => {
            let result = calculus.check_close_str(state)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        ["show", state] => {
            let state = calculus.decode_state(state)?;
            println!("{}", serde_json::to_string_pretty(&TableauxStateJson::from_state(&state))?);
        }
        ["cnf", formula] => {
            let formula = parse_formula(formula)?;
            let clauses = formula_to_cnf(&formula, config.cnf_strategy, config.blowup_limit())?;
            println!("{}", clauses);
        }
        _ => bail!("{}", USAGE),
    }
    Ok(())
}

fn option_value(args: &[String], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing value for {}", args[i]),
    }
}
