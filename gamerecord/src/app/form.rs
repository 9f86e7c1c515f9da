use crate::app::games::Platform;
use crate::svc::RecordPayload;

/// Longest age the input surface accepts.
pub const AGE_MAX_LEN: usize = 3;

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct FormState {
    pub name: String,
    pub age: String,
    pub platform: Option<Platform>,
    pub game_id: String,
}

impl FormState {
    pub fn to_payload(&self) -> RecordPayload {
        RecordPayload {
            name: self.name.clone(),
            age: self.age.clone(),
            game_id: self.game_id.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TextField {
    Name,
    Age,
}
