use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "IM")]
    IndividualMedley,
}

impl Stroke {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freestyle => "Freestyle",
            Self::Backstroke => "Backstroke",
            Self::Breaststroke => "Breaststroke",
            Self::Butterfly => "Butterfly",
            Self::IndividualMedley => "IM",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stroke {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Freestyle" => Ok(Self::Freestyle),
            "Backstroke" => Ok(Self::Backstroke),
            "Breaststroke" => Ok(Self::Breaststroke),
            "Butterfly" => Ok(Self::Butterfly),
            "IM" => Ok(Self::IndividualMedley),
            other => Err(ParseEnumError::new("stroke", other)),
        }
    }
}

impl TryFrom<String> for Stroke {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub distance: i32,
    #[sqlx(try_from = "String")]
    pub stroke: Stroke,
}
