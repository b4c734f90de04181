mod operations;
mod stack;

pub use operations::DrawingOperation;
pub use stack::OperationStack;
