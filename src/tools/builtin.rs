//! Domain tools used by the demo agents.
//!
//! Each tool's logic lives in a plain function so it can be tested without
//! an agent; the `*_tool` constructors wrap them as [`FunctionTool`]s and
//! return `Arc<dyn Tool>`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use adk::tools::builtin::{get_current_time_tool, get_weather_tool};
//!
//! let tools = vec![get_weather_tool(), get_current_time_tool()];
//! assert_eq!(tools.len(), 2);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::arguments::as_whole_number;
use super::result::ToolResult;
use super::tool::{FunctionTool, Tool, ToolContext};
use super::types::ToolParameters;

/// Simulated sensor latency of [`get_temperature_tool`].
pub const TEMPERATURE_READ_DELAY: Duration = Duration::from_secs(2);

const NEW_YORK_TZ: chrono_tz::Tz = chrono_tz::America::New_York;

fn is_new_york(city: &str) -> bool {
    city.trim().eq_ignore_ascii_case("new york")
}

// ── weather / time ──────────────────────────────────────────────────────

/// Weather report for `city`. Only New York is known.
pub fn get_weather(city: &str) -> ToolResult {
    if is_new_york(city) {
        ToolResult::success(
            "The weather in New York is sunny with a temperature of 25 degrees Celsius (77 degrees Fahrenheit).",
        )
    } else {
        ToolResult::error(format!("Weather information for '{city}' is not available."))
    }
}

/// Current local time in `city`. Only New York is known.
pub fn get_current_time(city: &str) -> ToolResult {
    get_current_time_at(city, Utc::now())
}

/// [`get_current_time`] evaluated at a fixed instant.
pub fn get_current_time_at(city: &str, now: DateTime<Utc>) -> ToolResult {
    if !is_new_york(city) {
        return ToolResult::error(format!(
            "Sorry, I don't have timezone information for {city}."
        ));
    }
    let local = now.with_timezone(&NEW_YORK_TZ);
    ToolResult::success(format!(
        "The current time in {city} is {} {}",
        local.format("%-m/%-d/%Y, %-I:%M:%S %p"),
        NEW_YORK_TZ.name()
    ))
}

pub fn get_weather_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "get_weather",
        "Retrieves the current weather report for a specified city.",
        ToolParameters::object()
            .string("city", "The name of the city.", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            Ok(get_weather(args.get_str("city")?).into())
        },
    ))
}

pub fn get_current_time_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "get_current_time",
        "Returns the current time in a specified city.",
        ToolParameters::object()
            .string("city", "The name of the city.", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            Ok(get_current_time(args.get_str("city")?).into())
        },
    ))
}

// ── dice / primes ───────────────────────────────────────────────────────

/// Roll a die with `sides` faces. `None` when the die has no faces.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, sides: i64) -> Option<i64> {
    (sides >= 1).then(|| rng.random_range(1..=sides))
}

/// Deterministic Miller-Rabin; these witnesses cover every 64-bit input.
fn is_prime(n: i64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    if n < 2 {
        return false;
    }
    let n = n as u64;
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Report which of `numbers` are prime, ascending and de-duplicated.
pub fn check_prime(numbers: &[i64]) -> String {
    let primes: BTreeSet<i64> = numbers.iter().copied().filter(|n| is_prime(*n)).collect();
    if primes.is_empty() {
        return "No prime numbers found.".to_string();
    }
    let listed: Vec<String> = primes.iter().map(i64::to_string).collect();
    format!("{} are prime numbers.", listed.join(", "))
}

pub fn roll_dice_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "roll_dice",
        "Roll a die and return the rolled result.",
        ToolParameters::object()
            .integer("sides", "The number of sides of the dice.", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            let sides = args.get_i64("sides")?;
            let rolled = roll_dice(&mut rand::rng(), sides);
            Ok(match rolled {
                Some(value) => serde_json::json!(value),
                None => ToolResult::error(format!(
                    "A die must have at least one side, got {sides}."
                ))
                .into(),
            })
        },
    ))
}

pub fn check_prime_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "check_prime",
        "Check if a given list of numbers are prime.",
        ToolParameters::object()
            .array("numbers", "The list of numbers to check.", "integer", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            let numbers: Vec<i64> = args
                .get_array("numbers")?
                .iter()
                .filter_map(as_whole_number)
                .collect();
            Ok(serde_json::json!(check_prime(&numbers)))
        },
    ))
}

// ── temperature ─────────────────────────────────────────────────────────

/// Stdout line printed for every temperature reading.
pub fn temperature_line(temperature: f64) -> String {
    format!("Current temperature is: {temperature}")
}

/// Stdout line printed when the user is notified.
pub fn notification_line(temperature: f64, threshold: f64) -> String {
    format!("[NOTIFICATION]: Temperature {temperature} is too high! Threshold is {threshold}.")
}

/// Reads a simulated temperature in [30, 40) after `delay`.
pub fn get_temperature_tool(delay: Duration) -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "get_temperature",
        "Get the temperature from the environment.",
        ToolParameters::empty(),
        move |_args, ctx: ToolContext| async move {
            tokio::time::sleep(delay).await;
            let temperature: f64 = rand::rng().random_range(30.0..40.0);
            tracing::debug!(agent = %ctx.agent_name, temperature, "temperature read");
            println!("{}", temperature_line(temperature));
            Ok(serde_json::json!(temperature))
        },
    ))
}

pub fn notify_user_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "notify_user",
        "Notify the user if temperature is too high.",
        ToolParameters::object()
            .number("temperature", "The temperature.", true)
            .number("threshold", "The threshold.", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            let temperature = args.get_f64("temperature")?;
            let threshold = args.get_f64("threshold")?;
            println!("{}", notification_line(temperature, threshold));
            Ok(ToolResult::success(format!(
                "User notified that temperature {temperature} exceeds threshold {threshold}."
            ))
            .into())
        },
    ))
}

/// Random whole-degree temperature in [15, 35) for any city.
pub fn get_weather_temperature<R: Rng + ?Sized>(rng: &mut R, city: &str) -> String {
    let temperature: i64 = rng.random_range(15..35);
    format!("Temperature in {city} is {temperature} Celsius.")
}

pub fn get_weather_temperature_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "get_weather_temperature",
        "Retrieves the current temperature in celsius for a specified city.",
        ToolParameters::object()
            .string("city", "The name of the city.", true)
            .build(),
        |args, _ctx: ToolContext| async move {
            let report = get_weather_temperature(&mut rand::rng(), args.get_str("city")?);
            Ok(serde_json::json!(report))
        },
    ))
}
