/// Commands the host page can send to the traveler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a journey to a registry name or `"home"`.
    Navigate(String),
}

/// A queue of commands.
/// JS pushes commands at any time; the runner drains them at the start of each frame.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    /// Push a command (called from JS via wasm-bindgen).
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
