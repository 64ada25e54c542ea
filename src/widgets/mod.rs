//! The widget set: Card, Input, Password, Textarea, Toggle, Button.

pub mod button;
pub mod card;
pub mod input;
pub mod password;
pub mod textarea;
pub mod toggle;

pub use button::{Button, ButtonConfig, ButtonPatch, ButtonVariant};
pub use card::{Card, CardConfig, CardPatch};
pub use input::{Input, InputConfig, InputPatch, ValidateOn};
pub use password::{Password, PasswordConfig, PasswordPatch};
pub use textarea::{Textarea, TextareaConfig, TextareaPatch};
pub use toggle::{Toggle, ToggleConfig, TogglePatch, ToggleStyle};
