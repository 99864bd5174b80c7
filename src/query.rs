//! Ingredient lookup over saved groups.
//!
//! [`GroupIndex::lookup`] is a pure function of the saved groups and a search
//! term; [`run_search_loop`] is the read/print loop around it.

use crate::store::IngredientGroups;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Word that ends the interactive loop.
pub const EXIT_COMMAND: &str = "exit";

/// One ingredient that pairs with the searched one.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing {
    /// The other member of the pair
    pub ingredient: String,
    /// Log score of the pair
    pub score: f64,
}

/// A larger group containing the searched ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    /// The remaining members, in column order
    pub ingredients: Vec<String>,
    /// Log score of the whole group
    pub score: f64,
}

/// Result of looking up one term.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The term is not a known ingredient.
    NotFound {
        /// Normalised term
        term: String,
    },
    /// The term is known; lists may still be empty.
    Found {
        /// Matched ingredient name
        ingredient: String,
        /// Size-2 groups, best score first
        pairings: Vec<Pairing>,
        /// Size >= 3 groups, best score first
        combinations: Vec<Combination>,
    },
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::NotFound { term } => write!(f, "ingredient not found: {term}"),
            QueryOutcome::Found {
                pairings,
                combinations,
                ..
            } => {
                writeln!(f, "{} pairings found:", pairings.len())?;
                for p in pairings {
                    writeln!(f, "  {} (score {:.2})", p.ingredient, p.score)?;
                }
                writeln!(f, "{}", "-".repeat(60))?;
                write!(f, "{} combinations found:", combinations.len())?;
                for c in combinations {
                    write!(f, "\n  {} (score {:.2})", c.ingredients.join(", "), c.score)?;
                }
                Ok(())
            }
        }
    }
}

/// Case-insensitive lookup over saved groups.
#[derive(Debug)]
pub struct GroupIndex<'a> {
    groups: &'a IngredientGroups,
    known: HashMap<String, &'a str>,
}

impl<'a> GroupIndex<'a> {
    /// Indexes the vocabulary of `groups`.
    #[must_use]
    pub fn new(groups: &'a IngredientGroups) -> Self {
        let known = groups
            .ingredients
            .iter()
            .map(|name| (name.to_lowercase(), name.as_str()))
            .collect();
        Self { groups, known }
    }

    /// Looks up one ingredient.
    ///
    /// The term is trimmed and lower-cased. An unknown term is
    /// [`QueryOutcome::NotFound`], never an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingredient_groups::mining::ItemSet;
    /// use ingredient_groups::query::{GroupIndex, QueryOutcome};
    /// use ingredient_groups::store::IngredientGroups;
    ///
    /// let groups = IngredientGroups {
    ///     item_sets: vec![ItemSet::from_items([0, 1])],
    ///     named: vec![vec!["basil".into(), "tomato".into()]],
    ///     scores: vec![1.2],
    ///     ingredients: vec!["basil".into(), "tomato".into(), "cumin".into()],
    /// };
    /// let index = GroupIndex::new(&groups);
    ///
    /// match index.lookup("  Basil ") {
    ///     QueryOutcome::Found { pairings, .. } => assert_eq!(pairings[0].ingredient, "tomato"),
    ///     QueryOutcome::NotFound { .. } => unreachable!(),
    /// }
    /// assert!(matches!(index.lookup("saffron"), QueryOutcome::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn lookup(&self, term: &str) -> QueryOutcome {
        let term = term.trim().to_lowercase();
        let Some(&ingredient) = self.known.get(&term) else {
            return QueryOutcome::NotFound { term };
        };

        let mut pairings = Vec::new();
        let mut combinations = Vec::new();
        for (names, score) in self.groups.iter() {
            if !names.iter().any(|n| n == ingredient) {
                continue;
            }
            let rest: Vec<String> = names
                .iter()
                .filter(|n| *n != ingredient)
                .cloned()
                .collect();
            match names.len() {
                2 => pairings.extend(rest.into_iter().map(|other| Pairing {
                    ingredient: other,
                    score,
                })),
                n if n > 2 => combinations.push(Combination {
                    ingredients: rest,
                    score,
                }),
                _ => {}
            }
        }

        pairings.sort_by(|a, b| b.score.total_cmp(&a.score));
        combinations.sort_by(|a, b| b.score.total_cmp(&a.score));

        QueryOutcome::Found {
            ingredient: ingredient.to_string(),
            pairings,
            combinations,
        }
    }

    /// Number of known ingredients.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.known.len()
    }
}

/// Prompts for ingredients until `exit` or end of input.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn run_search_loop<R: BufRead, W: Write>(
    index: &GroupIndex<'_>,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(
        output,
        "Starting search mode. (Type \"{EXIT_COMMAND}\" to exit search mode.)"
    )?;
    let mut line = String::new();
    loop {
        write!(output, "Search for ingredient: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let term = line.trim();
        if term.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if term.is_empty() {
            continue;
        }
        writeln!(output, "{}", index.lookup(term))?;
    }
    Ok(())
}
