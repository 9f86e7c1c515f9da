#[derive(Debug, serde::Serialize, serde::Deserialize, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Pc,
    Xbox,
    Playstation,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Pc, Platform::Xbox, Platform::Playstation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Xbox => "XBOX",
            Platform::Playstation => "PLAYSTATION",
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Eq, PartialEq)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub platform: Platform,
}

/// A game decorated with the fields a picker needs.
#[derive(Debug, serde::Serialize, Clone, Eq, PartialEq)]
pub struct SelectableGame {
    #[serde(flatten)]
    pub game: Game,
    pub label: String,
    pub value: i64,
}

impl From<Game> for SelectableGame {
    fn from(game: Game) -> Self {
        SelectableGame {
            label: game.title.clone(),
            value: game.id,
            game,
        }
    }
}

/// The game catalog and the subset matching the last selected platform.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct GameCollection {
    all: Vec<SelectableGame>,
    filtered: Vec<SelectableGame>,
}

impl GameCollection {
    pub fn new(games: Vec<Game>) -> Self {
        GameCollection {
            all: games.into_iter().map(SelectableGame::from).collect(),
            filtered: Vec::new(),
        }
    }

    pub fn all(&self) -> &[SelectableGame] {
        &self.all
    }

    pub fn filtered(&self) -> &[SelectableGame] {
        &self.filtered
    }

    pub fn filter_by(&mut self, platform: Platform) {
        self.filtered = self
            .all
            .iter()
            .filter(|g| g.game.platform == platform)
            .cloned()
            .collect();
    }
}
