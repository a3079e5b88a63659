use ropey::Rope;

/// Invoked with the new char offset whenever the cursor moves.
pub type CursorListener = Box<dyn FnMut(usize) + Send>;

/// The editable text the user sees.
///
/// The document controller only ever reads or replaces the whole text; finer
/// grained editing belongs to the implementation.
pub trait TextSurface {
    fn full_text(&self) -> String;
    fn set_full_text(&mut self, text: &str);
    /// Cursor as a 0-based char offset.
    fn cursor(&self) -> usize;
    fn set_cursor(&mut self, offset: usize);
    fn on_cursor_changed(&mut self, listener: CursorListener);
}

pub struct Buffer {
    pub rope: Rope,
    cursor: usize,
    listeners: Vec<CursorListener>,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::from(""),
            cursor: 0,
            listeners: Vec::new(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.rope = Rope::from_str(text);
        buffer
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Append text at the end of the buffer, leaving the cursor after it.
    pub fn append(&mut self, text: &str) {
        let end = self.rope.len_chars();
        self.rope.insert(end, text);
        let end = self.rope.len_chars();
        self.set_cursor(end);
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }
}

impl TextSurface for Buffer {
    fn full_text(&self) -> String {
        self.rope.to_string()
    }

    fn set_full_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.rope.len_chars());
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
        let cursor = self.cursor;
        for listener in &mut self.listeners {
            listener(cursor);
        }
    }

    fn on_cursor_changed(&mut self, listener: CursorListener) {
        self.listeners.push(listener);
    }
}
