//! CSV row types and their conversion to domain entities.

use std::io::Read;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use taps_core::domain::{Tag, Tap, Team, parse_instant};

use super::ImportError;

/// `teams.csv`: `id,name[,token]`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl TeamRecord {
    /// Teams without a token get a freshly generated one.
    pub fn into_team(self) -> Team {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        Team::new(self.id, self.name, token)
    }
}

/// `tags.csv`: `tagUid,teamId,created_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagRecord {
    #[serde(rename = "tagUid")]
    pub tag_uid: i64,
    #[serde(rename = "teamId")]
    pub team_id: i32,
    pub created_at: String,
}

impl TagRecord {
    pub fn into_tag(self, line: u64) -> Result<Tag, ImportError> {
        let created_at = parse_instant(&self.created_at).map_err(|e| ImportError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        Ok(Tag {
            tag_uid: self.tag_uid,
            team_id: self.team_id,
            created_at,
        })
    }
}

/// `taps.csv`: `tagUid,count,createdAt`.
#[derive(Debug, Clone, Deserialize)]
pub struct TapRecord {
    #[serde(rename = "tagUid")]
    pub tag_uid: i64,
    pub count: i32,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl TapRecord {
    pub fn into_tap(self, line: u64) -> Result<Tap, ImportError> {
        let created_at = parse_instant(&self.created_at).map_err(|e| ImportError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        Ok(Tap {
            tag_uid: self.tag_uid,
            count: self.count,
            created_at,
        })
    }
}

/// Read every row of a headed CSV file, paired with its line number.
pub fn read_records<T, R>(reader: R) -> Result<Vec<(u64, T)>, ImportError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: T = row.deserialize(Some(&headers))?;
        records.push((line, record));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_read_teams_with_and_without_token() {
        let input = "id,name,token\n1,Alpha,alpha-token\n2,Beta,\n";

        let teams: Vec<_> = read_records::<TeamRecord, _>(input.as_bytes())
            .unwrap()
            .into_iter()
            .map(|(_, r)| r.into_team())
            .collect();

        assert_eq!(teams[0].token, "alpha-token");
        assert_eq!(teams[1].name, "Beta");
        assert_eq!(teams[1].token.len(), 32);
    }

    #[test]
    fn test_read_teams_without_token_column() {
        let input = "id,name\n5,Gamma\n";

        let records = read_records::<TeamRecord, _>(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].1.token.is_none());
    }

    #[test]
    fn test_read_taps_and_convert() {
        let input = "tagUid,count,createdAt\n10,3,2024-01-01T05:00:00Z\n11,1,2024-01-02\n";

        let taps = read_records::<TapRecord, _>(input.as_bytes()).unwrap();
        let (line, record) = taps[1].clone();
        let tap = record.into_tap(line).unwrap();

        assert_eq!(tap.tag_uid, 11);
        assert_eq!(tap.created_at, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_bad_date_reports_line() {
        let input = "tagUid,teamId,created_at\n10,1,2024-01-01\n11,1,not-a-date\n";

        let records = read_records::<TagRecord, _>(input.as_bytes()).unwrap();
        let (line, record) = records[1].clone();
        let err = record.into_tag(line).unwrap_err();

        assert!(matches!(err, ImportError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_non_numeric_id_is_a_csv_error() {
        let input = "id,name\nabc,Alpha\n";

        let err = read_records::<TeamRecord, _>(input.as_bytes()).unwrap_err();

        assert!(matches!(err, ImportError::Csv(_)));
    }
}
