// src/common/dates.rs

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Lotes com esta quantidade de dias (ou menos) são críticos.
pub const CRITICAL_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MONTHS_PT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Dias até a validade, contados a partir de `now`.
///
/// A validade vale a partir da meia-noite (UTC) do dia informado e a diferença
/// é arredondada para cima: fração de dia conta como um dia inteiro restante.
/// Resultado `<= 0` significa lote vencido.
pub fn days_remaining_at(expiration: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expires_at = expiration.and_time(chrono::NaiveTime::MIN).and_utc();
    let millis = (expires_at - now).num_milliseconds();

    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 { days + 1 } else { days }
}

pub fn is_critical(days_remaining: i64) -> bool {
    days_remaining <= CRITICAL_DAYS
}

pub fn is_expired(days_remaining: i64) -> bool {
    days_remaining <= 0
}

/// Formata para exibição: "12/OUT".
pub fn format_display_date(date: NaiveDate) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{:02}/{}", date.day(), month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[rstest]
    #[case::same_instant(date(2026, 10, 16), at(2026, 10, 16, 0), 0)]
    #[case::later_same_day(date(2026, 10, 16), at(2026, 10, 16, 10), 0)]
    #[case::tomorrow_partial_day(date(2026, 10, 17), at(2026, 10, 16, 10), 1)]
    #[case::tomorrow_exact(date(2026, 10, 17), at(2026, 10, 16, 0), 1)]
    #[case::yesterday(date(2026, 10, 15), at(2026, 10, 16, 0), -1)]
    #[case::yesterday_afternoon(date(2026, 10, 15), at(2026, 10, 16, 15), -1)]
    #[case::next_month(date(2026, 11, 16), at(2026, 10, 16, 12), 31)]
    fn days_remaining_rounds_up(
        #[case] expiration: NaiveDate,
        #[case] now: DateTime<Utc>,
        #[case] expected: i64,
    ) {
        assert_eq!(days_remaining_at(expiration, now), expected);
    }

    #[rstest]
    #[case(-2, true, true)]
    #[case(0, true, true)]
    #[case(3, true, false)]
    #[case(4, false, false)]
    fn critical_and_expired_thresholds(
        #[case] days: i64,
        #[case] critical: bool,
        #[case] expired: bool,
    ) {
        assert_eq!(is_critical(days), critical);
        assert_eq!(is_expired(days), expired);
    }

    #[test]
    fn display_date_uses_portuguese_months() {
        assert_eq!(format_display_date(date(2026, 10, 12)), "12/OUT");
        assert_eq!(format_display_date(date(2027, 2, 3)), "03/FEV");
        assert_eq!(format_display_date(date(2026, 12, 31)), "31/DEZ");
    }
}
