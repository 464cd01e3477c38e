use serde::{Deserialize, Serialize};

/// Category a board word belongs to, from the clue-giver's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Own-team words the clue should point to.
    Target,
    /// Opposing team's words.
    Opponent,
    /// Neutral bystander words.
    Bystander,
    /// The forbidden word that loses the game instantly.
    Assassin,
}

/// All roles in report order (sorted by name, matching the serialized layout).
pub const ROLES_BY_NAME: [Role; 4] = [
    Role::Assassin,
    Role::Bystander,
    Role::Opponent,
    Role::Target,
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Target => "target",
            Role::Opponent => "opponent",
            Role::Bystander => "bystander",
            Role::Assassin => "assassin",
        }
    }

    pub fn from_str(name: &str) -> Option<Role> {
        match name {
            "target" => Some(Role::Target),
            "opponent" => Some(Role::Opponent),
            "bystander" => Some(Role::Bystander),
            "assassin" => Some(Role::Assassin),
            _ => None,
        }
    }
}

/// Signed weights biasing the similarity query per role.
///
/// The target weight pulls candidates toward the chosen subset; the other
/// three push away, more strongly the more dangerous a mismatch is.
/// Invariant: `target > 0 > bystander >= opponent >= assassin`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWeights {
    pub target: i32,
    pub bystander: i32,
    pub opponent: i32,
    pub assassin: i32,
}

impl Default for TeamWeights {
    fn default() -> Self {
        Self {
            target: 30,
            bystander: -1,
            opponent: -3,
            assassin: -7,
        }
    }
}

impl TeamWeights {
    pub fn weight(&self, role: Role) -> i32 {
        match role {
            Role::Target => self.target,
            Role::Opponent => self.opponent,
            Role::Bystander => self.bystander,
            Role::Assassin => self.assassin,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.target > 0
            && self.bystander < 0
            && self.bystander >= self.opponent
            && self.opponent >= self.assassin
    }
}

/// How many words each role receives in a random assignment.
///
/// Bystanders are not configured directly: whatever remains of the fixed
/// board total is back-filled as neutral words.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSizes {
    pub target: usize,
    pub opponent: usize,
    pub assassin: usize,
}

pub const BOARD_TOTAL: usize = 25;

impl Default for TeamSizes {
    fn default() -> Self {
        Self {
            target: 8,
            opponent: 8,
            assassin: 1,
        }
    }
}

impl TeamSizes {
    pub fn bystander(&self) -> usize {
        BOARD_TOTAL.saturating_sub(self.target + self.opponent + self.assassin)
    }

    pub fn size(&self, role: Role) -> usize {
        match role {
            Role::Target => self.target,
            Role::Opponent => self.opponent,
            Role::Bystander => self.bystander(),
            Role::Assassin => self.assassin,
        }
    }

    pub fn total(&self) -> usize {
        self.target + self.opponent + self.assassin + self.bystander()
    }
}

/// One round's role-to-word mapping. A word appears under at most one role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardAssignment {
    pub target: Vec<String>,
    pub opponent: Vec<String>,
    pub bystander: Vec<String>,
    pub assassin: Vec<String>,
}

impl BoardAssignment {
    pub fn words(&self, role: Role) -> &[String] {
        match role {
            Role::Target => &self.target,
            Role::Opponent => &self.opponent,
            Role::Bystander => &self.bystander,
            Role::Assassin => &self.assassin,
        }
    }

    pub fn words_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Target => &mut self.target,
            Role::Opponent => &mut self.opponent,
            Role::Bystander => &mut self.bystander,
            Role::Assassin => &mut self.assassin,
        }
    }

    /// Union of all roles' words, in role-by-name order. Read for legality
    /// comparisons and by the operative evaluator.
    pub fn board_words(&self) -> Vec<String> {
        ROLES_BY_NAME
            .iter()
            .flat_map(|&role| self.words(role).iter().cloned())
            .collect()
    }

    /// Words the searcher must steer away from: everything except targets.
    pub fn avoid_words(&self) -> Vec<(Role, Vec<String>)> {
        [Role::Bystander, Role::Opponent, Role::Assassin]
            .into_iter()
            .map(|role| (role, self.words(role).to_vec()))
            .collect()
    }
}
