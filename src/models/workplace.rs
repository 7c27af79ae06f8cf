use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    pub hourly_wage: f64,
}

/// A place of employment with the positions the user holds there.
/// The order of `positions` carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workplace {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub location: String,
    pub positions: Vec<Position>,
}

impl Workplace {
    pub fn position(&self, position_id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == position_id)
    }

    /// Match a position by id or (case-insensitive) title.
    pub fn find_position(&self, key: &str) -> Option<&Position> {
        self.position(key).or_else(|| {
            self.positions
                .iter()
                .find(|p| p.title.eq_ignore_ascii_case(key))
        })
    }
}

/// Partial replacement of a workplace. Positions are managed separately.
#[derive(Debug, Clone, Default)]
pub struct WorkplaceUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl WorkplaceUpdate {
    pub fn apply_to(&self, w: &mut Workplace) {
        if let Some(n) = &self.name {
            w.name = n.clone();
        }
        if let Some(l) = &self.location {
            w.location = l.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_lookup_by_id_or_title() {
        let w = Workplace {
            id: "w".into(),
            user_id: "u".into(),
            name: "Blue Note".into(),
            location: "Main St".into(),
            positions: vec![
                Position {
                    id: "p1".into(),
                    title: "Server".into(),
                    hourly_wage: 7.25,
                },
                Position {
                    id: "p2".into(),
                    title: "Bartender".into(),
                    hourly_wage: 9.0,
                },
            ],
        };
        assert_eq!(w.find_position("p2").map(|p| p.hourly_wage), Some(9.0));
        assert_eq!(w.find_position("server").map(|p| p.id.as_str()), Some("p1"));
        assert!(w.find_position("host").is_none());
    }
}
