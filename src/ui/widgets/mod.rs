mod carousel;
mod stepper;
mod toast;

pub use carousel::{CarouselState, NO_SLIDES_MESSAGE};
pub use stepper::{render_stepper, stepper_height, stepper_lines, CHECK, EMPTY, SPINNER_FRAMES};
pub use toast::{Toast, ToastQueue, ToastVariant};
