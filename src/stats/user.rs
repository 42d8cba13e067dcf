use std::collections::HashMap;
use std::fmt;

use super::{mode_max, value_counts};
use crate::data::model::TripTable;

/// Counts per distinct value in order of first appearance. `None` is the
/// missing-value bucket, printed as "No Record".
pub type Breakdown = Vec<(Option<String>, usize)>;

pub fn breakdown<'a, I: IntoIterator<Item = Option<&'a str>>>(values: I) -> Breakdown {
    let mut order: Breakdown = Vec::new();
    let mut slots: HashMap<Option<&str>, usize> = HashMap::new();
    for v in values {
        let slot = *slots.entry(v).or_insert_with(|| {
            order.push((v.map(str::to_string), 0));
            order.len() - 1
        });
        order[slot].1 += 1;
    }
    order
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Breakdown,
    /// `None` when the dataset has no Gender column.
    pub genders: Option<Breakdown>,
    pub has_birth_year: bool,
    /// `None` when there is no column or no recorded year.
    pub birth_years: Option<BirthYears>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types = breakdown(table.trips.iter().map(|t| t.user_type.as_deref()));

    let genders = table
        .has_gender()
        .then(|| breakdown(table.trips.iter().map(|t| t.gender.as_deref())));

    let has_birth_year = table.has_birth_year();
    let birth_years = if has_birth_year {
        let counts = value_counts(table.trips.iter().filter_map(|t| t.birth_year));
        match (counts.keys().next(), counts.keys().next_back(), mode_max(&counts)) {
            (Some(&earliest), Some(&latest), Some(most_common)) => Some(BirthYears {
                earliest,
                latest,
                most_common,
            }),
            _ => None,
        }
    } else {
        None
    };

    UserStats {
        user_types,
        genders,
        has_birth_year,
        birth_years,
    }
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, breakdown: &Breakdown) -> fmt::Result {
    for (value, count) in breakdown {
        match value {
            Some(v) => writeln!(f, "{v}: {count}")?,
            None => writeln!(f, "No Record: {count}")?,
        }
    }
    Ok(())
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The breakdown of user types is as follows:")?;
        write_breakdown(f, &self.user_types)?;

        if let Some(genders) = &self.genders {
            writeln!(f, "\nThe breakdown of customers' gender is as follows:")?;
            write_breakdown(f, genders)?;
        }

        if self.has_birth_year {
            match self.birth_years {
                Some(years) => {
                    writeln!(
                        f,
                        "\nThe earliest birth year in the requested data is {}.",
                        years.earliest
                    )?;
                    writeln!(
                        f,
                        "The latest birth year in the requested data is {}.",
                        years.latest
                    )?;
                    writeln!(
                        f,
                        "The most common birth year in the requested data is {}.",
                        years.most_common
                    )?;
                }
                None => writeln!(f, "\nNo birth years are recorded in the requested data.")?,
            }
        }
        Ok(())
    }
}
