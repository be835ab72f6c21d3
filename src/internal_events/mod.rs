pub trait InternalEvent {
    fn emit_logs(&self) {}
    fn emit_metrics(&self) {}
}

pub fn emit(event: impl InternalEvent) {
    event.emit_logs();
    event.emit_metrics();
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::internal_events::emit($event);
    };
}

// Modules that use the emit! macro must be declared after it.
mod field;
mod metadata;
mod operator;

pub use self::field::*;
pub use self::metadata::*;
pub use self::operator::*;
