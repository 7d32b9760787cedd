use std::fmt::Write;

use weather_agent_core::Outcome;

/// Human-readable summary of an outcome.
pub fn render(outcome: &Outcome) -> String {
    let mut out = String::new();

    match outcome {
        Outcome::Success { data, .. } => {
            let _ = writeln!(
                out,
                "{} ({}) [{}]",
                data.condition_main, data.condition_description, data.icon_code
            );
            let _ = writeln!(
                out,
                "Temperature: {}°C (feels like {}°C, min {}°C, max {}°C)",
                data.temperature_c, data.feels_like_c, data.temp_min_c, data.temp_max_c
            );
            let _ = writeln!(out, "Humidity:    {}%", data.humidity_pct);
            let _ = writeln!(out, "Pressure:    {} hPa", data.pressure_hpa);
            let _ = writeln!(out, "Visibility:  {} m", data.visibility_m);
            let _ = writeln!(
                out,
                "Wind:        {} m/s at {}°",
                data.wind_speed_mps, data.wind_degree
            );
        }
        Outcome::Failure { message } => {
            let _ = writeln!(out, "Lookup failed: {message}");
        }
    }

    out
}
