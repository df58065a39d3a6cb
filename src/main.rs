use std::env;
use std::process;

use chrono::{NaiveDate, NaiveDateTime};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mealtrack::adapters::memory_repo::InMemoryMealRepo;
use mealtrack::seed::{seed_demo_data, DEMO_USER};
use mealtrack::service::MealService;
use mealtrack::{Meal, MealError, MealId, UserId};

fn print_usage() {
    eprintln!(
        "mealtrack — in-memory per-user meal storage demo\n\n\
         Usage:\n  \
         mealtrack list [--user <id>] [--json]\n  \
         mealtrack between <start-date|-> <end-date|-> [--user <id>] [--json]\n  \
         mealtrack add <datetime> <description> <calories> [--user <id>]\n  \
         mealtrack get <id> [--user <id>]\n  \
         mealtrack delete <id> [--user <id>]\n\n\
         Notes:\n  \
         - Dates use 2020-01-31, datetimes 2020-01-31T13:00; '-' leaves a\n    \
           bound open.\n  \
         - The store is seeded with demo meals for user 1 and is not\n    \
           persisted across runs.\n  \
         - RUST_LOG controls log verbosity, LOG_FORMAT=json|pretty the output."
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let json = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("invalid datetime '{}': {}", s, e))
}

/// Parse a date bound; "-" leaves the bound open.
fn parse_date_bound(s: &str) -> Result<Option<NaiveDate>, String> {
    if s == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn parse_id(s: &str) -> Result<MealId, String> {
    s.parse().map_err(|_| format!("invalid id '{}'", s))
}

/// Pull `--user <id>` and `--json` out of the remaining args.
fn parse_flags(rest: &[String]) -> Result<(UserId, bool), String> {
    let mut user = DEMO_USER;
    let mut json = false;
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--user" => {
                if i + 1 >= rest.len() {
                    return Err("--user requires an id".into());
                }
                user = rest[i + 1]
                    .parse()
                    .map_err(|_| format!("invalid --user id '{}'", rest[i + 1]))?;
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            unk => {
                return Err(format!("unknown argument: {}", unk));
            }
        }
    }
    Ok((user, json))
}

fn print_meal(meal: &Meal) {
    let id = meal.id.map_or_else(|| "-".to_string(), |id| id.to_string());
    println!(
        "#{} {} {} ({} kcal)",
        id,
        meal.date_time.format("%Y-%m-%dT%H:%M"),
        meal.description,
        meal.calories
    );
}

fn print_meals(meals: &[Meal], json: bool) -> Result<(), String> {
    if json {
        let body =
            serde_json::to_string_pretty(meals).map_err(|e| format!("serialize failed: {}", e))?;
        println!("{}", body);
    } else {
        for meal in meals {
            print_meal(meal);
        }
    }
    Ok(())
}

fn run() -> Result<(), String> {
    init_tracing();

    let mut args = env::args().skip(1); // skip program name

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };

    // One process, one store, seeded up front; nothing survives exit
    let repo = InMemoryMealRepo::new();
    seed_demo_data(&repo);
    let svc = MealService::new(repo);

    let rest: Vec<String> = args.collect();

    match cmd.as_str() {
        "list" => {
            let (user, json) = parse_flags(&rest)?;
            print_meals(&svc.get_all(user), json)
        }
        "between" => {
            if rest.len() < 2 {
                return Err("between needs <start-date> and <end-date>".into());
            }
            let start = parse_date_bound(&rest[0])?;
            let end = parse_date_bound(&rest[1])?;
            let (user, json) = parse_flags(&rest[2..])?;
            print_meals(&svc.get_between(start, end, user), json)
        }
        "add" => {
            if rest.len() < 3 {
                return Err("add needs <datetime> <description> <calories>".into());
            }
            let date_time = parse_datetime(&rest[0])?;
            let description = rest[1].clone();
            let calories: u32 = rest[2]
                .parse()
                .map_err(|_| format!("invalid calories '{}'", rest[2]))?;
            let (user, _) = parse_flags(&rest[3..])?;

            let meal = Meal::new(user, date_time, description, calories);
            match svc.create(meal, user) {
                Ok(stored) => {
                    print_meal(&stored);
                    Ok(())
                }
                Err(e) => Err(format!("add failed: {}", e)),
            }
        }
        "get" => {
            if rest.is_empty() {
                return Err("get needs <id>".into());
            }
            let id = parse_id(&rest[0])?;
            let (user, _) = parse_flags(&rest[1..])?;
            match svc.get(id, user) {
                Ok(meal) => {
                    print_meal(&meal);
                    Ok(())
                }
                Err(MealError::NotFound { .. }) => Err("not found".into()),
                Err(e) => Err(format!("get failed: {}", e)),
            }
        }
        "delete" => {
            if rest.is_empty() {
                return Err("delete needs <id>".into());
            }
            let id = parse_id(&rest[0])?;
            let (user, _) = parse_flags(&rest[1..])?;
            match svc.delete(id, user) {
                Ok(()) => {
                    println!("deleted #{}", id);
                    Ok(())
                }
                Err(MealError::NotFound { .. }) => Err("not found".into()),
                Err(e) => Err(format!("delete failed: {}", e)),
            }
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(msg) = run() {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}
