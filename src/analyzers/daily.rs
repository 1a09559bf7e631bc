use crate::analyzers::types::{DailyWeather, HourlyWeather};
use crate::analyzers::utility::{group_by_first_seen, round_to};

/// Collapses hourly observations into one [`DailyWeather`] per calendar date.
///
/// Dates appear in the order they are first seen. Dates without any hourly
/// row are absent.
#[tracing::instrument(skip_all, fields(hourly = hourly.len()))]
pub fn aggregate_daily(hourly: &[HourlyWeather]) -> Vec<DailyWeather> {
    let days = group_by_first_seen(hourly, |w| w.date_time.date());

    let daily: Vec<DailyWeather> = days
        .into_iter()
        .map(|(date, rows)| {
            let temp_sum: f64 = rows.iter().map(|w| w.temperature).sum();
            let rain_sum: f64 = rows.iter().map(|w| w.precipitation).sum();
            DailyWeather {
                date,
                avg_temp: round_to(temp_sum / rows.len() as f64, 1),
                total_rain: round_to(rain_sum, 2),
            }
        })
        .collect();

    tracing::debug!(days = daily.len(), "Daily weather aggregated");
    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Condition;
    use chrono::{NaiveDate, NaiveDateTime};

    fn reading(ts: &str, temperature: f64, precipitation: f64) -> HourlyWeather {
        HourlyWeather {
            date_time: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").unwrap(),
            temperature,
            precipitation,
            wind_speed: 0.0,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_single_day_is_exact() {
        let hourly = vec![
            reading("2025-09-01 00:00", 18.0, 0.2),
            reading("2025-09-01 01:00", 19.0, 0.35),
            reading("2025-09-01 02:00", 20.5, 0.0),
        ];
        let daily = aggregate_daily(&hourly);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(daily[0].avg_temp, 19.2);
        assert_eq!(daily[0].total_rain, 0.55);
        assert_eq!(daily[0].dominant_condition(), Condition::Sunny);
    }

    #[test]
    fn test_aggregate_one_row_per_date_in_first_seen_order() {
        let hourly = vec![
            reading("2025-09-02 10:00", 10.0, 0.6),
            reading("2025-09-01 10:00", 20.0, 0.0),
            reading("2025-09-02 11:00", 12.0, 0.6),
        ];
        let daily = aggregate_daily(&hourly);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
        assert_eq!(daily[0].avg_temp, 11.0);
        assert_eq!(daily[0].total_rain, 1.2);
        assert_eq!(daily[0].dominant_condition(), Condition::Rainy);
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_aggregate_does_not_synthesize_gaps() {
        let hourly = vec![
            reading("2025-09-01 10:00", 20.0, 0.0),
            reading("2025-09-05 10:00", 20.0, 0.0),
        ];
        assert_eq!(aggregate_daily(&hourly).len(), 2);
    }
}
