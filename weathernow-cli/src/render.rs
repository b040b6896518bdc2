//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use weathernow_core::{
    ConditionCategory, Dashboard, DashboardState, Session, WeatherSnapshot,
    aggregator::{NO_LOCATION_MESSAGE, NO_STORIES_MESSAGE},
};

pub fn render(dashboard: &Dashboard, session: &Session) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "WeatherNow Dashboard");
    if let Some(greeting) = session.greeting() {
        let _ = writeln!(out, "{greeting}");
    }
    out.push('\n');

    match dashboard.state() {
        DashboardState::Idle | DashboardState::LoadingWeather => {
            let _ = writeln!(out, "Loading weather...");
            return out;
        }
        DashboardState::NoLocation => {
            let _ = writeln!(out, "No weather data available");
            let _ = writeln!(out, "{NO_LOCATION_MESSAGE}");
            return out;
        }
        DashboardState::Error(message) => {
            let _ = writeln!(out, "No weather data available");
            let _ = writeln!(out, "{message}");
            return out;
        }
        DashboardState::LoadingNews | DashboardState::Ready => {}
    }

    let view = dashboard.view();
    if let Some(weather) = &view.weather {
        render_weather(&mut out, dashboard, weather);
    }

    let _ = writeln!(out, "Top Weather Stories");
    if dashboard.state() == &DashboardState::LoadingNews {
        let _ = writeln!(out, "  Loading stories...");
    } else if view.news.is_empty() {
        let _ = writeln!(out, "  {NO_STORIES_MESSAGE}");
    } else {
        for item in &view.news {
            let _ = writeln!(out, "  - {}", item.title);
            let _ = writeln!(out, "    {}", item.url);
        }
    }

    for warning in &view.warnings {
        let _ = writeln!(out, "\n! {warning}");
    }

    out
}

fn render_weather(out: &mut String, dashboard: &Dashboard, weather: &WeatherSnapshot) {
    let unit = dashboard.unit();
    let current = &weather.current;
    let category = dashboard.current_category().unwrap_or_default();
    let temperature = dashboard.current_temperature().unwrap_or_default();
    let advice = dashboard.recommendation().unwrap_or_default();

    let place = [&weather.place.name, &weather.place.region, &weather.place.country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "Current Weather: {place}   [{}]", unit.toggle_label());
    let _ = writeln!(out, "  {} {temperature}  {}", category.glyph(), current.condition);
    let _ = writeln!(
        out,
        "  Humidity: {}%   Wind Speed: {} mph",
        current.humidity_pct, current.wind_speed_mph
    );
    let _ = writeln!(
        out,
        "  Feels Like: {}   UV Index: {}",
        unit.format(current.feels_like_f),
        current.uv_index
    );
    let _ = writeln!(out, "  Recommendation: {advice}");
    out.push('\n');

    let _ = writeln!(out, "Hourly Forecast");
    for hour in &weather.hourly {
        let glyph = ConditionCategory::from_condition(&hour.condition).glyph();
        let _ = writeln!(
            out,
            "  {}  {} {}",
            hour.time.format("%H:00"),
            glyph,
            unit.format(hour.temperature_f)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{}-Day Forecast", weather.daily.len());
    for day in &weather.daily {
        let glyph = ConditionCategory::from_condition(&day.condition).glyph();
        let _ = writeln!(
            out,
            "  {}  {} H: {}  L: {}",
            day.date.format("%a"),
            glyph,
            unit.format(day.max_temperature_f),
            unit.format(day.min_temperature_f)
        );
    }
    out.push('\n');
}
