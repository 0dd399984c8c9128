//! Control surface: GPIO lines and user-assignable buttons

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpioField {
    State,
    Mode,
}

impl GpioField {
    pub const ALL: [GpioField; 2] = [GpioField::State, GpioField::Mode];

    pub fn suffix(self) -> &'static str {
        match self {
            GpioField::State => "$state",
            GpioField::Mode => "mode",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            GpioField::State => ValueKind::Bool,
            GpioField::Mode => ValueKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GpioField::State => "State",
            GpioField::Mode => "Mode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserControlField {
    Name,
    Color,
    Led,
}

impl UserControlField {
    pub const ALL: [UserControlField; 3] = [
        UserControlField::Name,
        UserControlField::Color,
        UserControlField::Led,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            UserControlField::Name => "name",
            UserControlField::Color => "col",
            UserControlField::Led => "led",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            UserControlField::Name => ValueKind::Text,
            UserControlField::Color => ValueKind::Number,
            UserControlField::Led => ValueKind::Bool,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserControlField::Name => "Name",
            UserControlField::Color => "Color",
            UserControlField::Led => "LED",
        }
    }
}

/// `/$ctl/gpio/{index}`
pub fn gpio_node(index: u32) -> String {
    format!("/$ctl/gpio/{}", index)
}

pub fn gpio_field(index: u32, field: GpioField) -> String {
    format!("{}/{}", gpio_node(index), field.suffix())
}

/// `/$ctl/user/{page}/{row}/{column}`
pub fn user_node(page: u32, row: u32, column: u32) -> String {
    format!("/$ctl/user/{}/{}/{}", page, row, column)
}

pub fn user_field(page: u32, row: u32, column: u32, field: UserControlField) -> String {
    format!("{}/{}", user_node(page, row, column), field.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_addresses() {
        assert_eq!(gpio_field(1, GpioField::State), "/$ctl/gpio/1/$state");
        assert_eq!(
            user_field(16, 2, 4, UserControlField::Led),
            "/$ctl/user/16/2/4/led"
        );
    }
}
