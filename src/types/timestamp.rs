use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A calendar date, held as midnight UTC
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub chrono::DateTime<chrono::Utc>);

impl Timestamp {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(chrono::Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    /// Parse loosely formatted user input, dropping any time of day
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let parsed = dateparser::parse_with_timezone(input.trim(), &chrono::Utc)
            .map_err(|e| anyhow::anyhow!("Invalid date {:?}: {}", input, e))?;
        Ok(Self::from_date(parsed.date_naive()))
    }

    /// `YYYY-MM-DD`, or `+YYYYYY-MM-DD` past year 9999
    pub fn iso_date(&self) -> String {
        let date = self.0.date_naive();
        if date.year() > 9999 {
            format!("+{:06}-{}", date.year(), date.format("%m-%d"))
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    /// The year as a plain number, no padding or grouping
    pub fn year_numeric(&self) -> String {
        self.0.year().to_string()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iso_date())
    }
}

impl sqlx::Type<sqlx::Sqlite> for Timestamp {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Timestamp {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> sqlx::encode::IsNull {
        args.push(sqlx::sqlite::SqliteArgumentValue::Int64(
            self.0.timestamp_millis(),
        ));

        sqlx::encode::IsNull::No
    }
}

impl<'r, DB: sqlx::Database> sqlx::Decode<'r, DB> for Timestamp
where
    i64: sqlx::Decode<'r, DB>,
{
    fn decode(
        value: <DB as sqlx::database::HasValueRef<'r>>::ValueRef,
    ) -> Result<Self, Box<dyn std::error::Error + 'static + Send + Sync>> {
        let value = <i64 as sqlx::Decode<DB>>::decode(value)?;
        match chrono::Utc.timestamp_millis_opt(value).single() {
            Some(ts) => Ok(Self(ts)),
            None => Err(format!("Timestamp out of range: {value}").into()),
        }
    }
}

/// A date that may be unknown. Unknown is stored as NULL, not as the epoch
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalTimestamp(pub Option<Timestamp>);

impl OptionalTimestamp {
    pub fn iso_date(&self) -> String {
        self.0.as_ref().map(Timestamp::iso_date).unwrap_or_default()
    }

    pub fn year_numeric(&self) -> String {
        self.0
            .as_ref()
            .map(Timestamp::year_numeric)
            .unwrap_or_default()
    }
}

impl From<Timestamp> for OptionalTimestamp {
    fn from(ts: Timestamp) -> Self {
        Self(Some(ts))
    }
}

impl sqlx::Type<sqlx::Sqlite> for OptionalTimestamp {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <Timestamp as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <Timestamp as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for OptionalTimestamp {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> sqlx::encode::IsNull {
        match &self.0 {
            Some(ts) => sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(ts, args),
            None => sqlx::encode::IsNull::Yes,
        }
    }
}

impl<'r, DB: sqlx::Database> sqlx::Decode<'r, DB> for OptionalTimestamp
where
    i64: sqlx::Decode<'r, DB>,
{
    fn decode(
        value: <DB as sqlx::database::HasValueRef<'r>>::ValueRef,
    ) -> Result<Self, Box<dyn std::error::Error + 'static + Send + Sync>> {
        Ok(Self(<Option<Timestamp> as sqlx::Decode<DB>>::decode(value)?))
    }
}
