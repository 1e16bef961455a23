//! Animal Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::validate_not_blank;

/// Animal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub species: String,
    pub enclosure: String,
    /// Caretaker account
    pub caretaker: Option<i64>,
    pub health_status: String,
    pub is_being_treated: bool,
    pub last_control: Option<NaiveDate>,
}

/// Create animal payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnimalCreate {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 0, max = 300))]
    pub age: i64,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub species: String,
    #[validate(length(min = 1, max = 100))]
    pub enclosure: String,
    pub caretaker: Option<i64>,
    #[validate(length(max = 100))]
    pub health_status: Option<String>,
    pub is_being_treated: Option<bool>,
    pub last_control: Option<NaiveDate>,
}

/// Update animal payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnimalUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 300))]
    pub age: Option<i64>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub species: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub enclosure: Option<String>,
    pub caretaker: Option<i64>,
    #[validate(length(max = 100))]
    pub health_status: Option<String>,
    pub is_being_treated: Option<bool>,
    pub last_control: Option<NaiveDate>,
}

impl AnimalUpdate {
    pub fn apply(self, animal: &mut Animal) {
        if let Some(name) = self.name {
            animal.name = name;
        }
        if let Some(age) = self.age {
            animal.age = age;
        }
        if let Some(species) = self.species {
            animal.species = species;
        }
        if let Some(enclosure) = self.enclosure {
            animal.enclosure = enclosure;
        }
        if let Some(caretaker) = self.caretaker {
            animal.caretaker = Some(caretaker);
        }
        if let Some(health_status) = self.health_status {
            animal.health_status = health_status;
        }
        if let Some(treated) = self.is_being_treated {
            animal.is_being_treated = treated;
        }
        if let Some(last_control) = self.last_control {
            animal.last_control = Some(last_control);
        }
    }
}
