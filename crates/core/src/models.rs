pub mod session;
pub mod slot;
pub mod template;
pub mod weekday;

pub use session::SessionKind;
pub use slot::{NewSlotInstance, SlotInstance};
pub use template::{
    MaterializeTemplateRequest, MaterializeTemplateResponse, NotesPolicy, RecurrenceTemplate,
    TemplateKey,
};
pub use weekday::{DayOfWeek, WeekdaySet};
