const CONTINUATION_MARKER: char = '\\';

//Joins the lines of a statement that ends its lines with \ into a single line
pub struct InputAssembler {
    pending_lines: Vec<String>,
}

impl InputAssembler {
    pub fn create() -> InputAssembler {
        InputAssembler {
            pending_lines: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending_lines.is_empty()
    }

    //Returns the whole statement once a line without the continuation marker is received
    pub fn add_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();

        match line.strip_suffix(CONTINUATION_MARKER) {
            Some(continued_line) => {
                self.pending_lines.push(continued_line.trim().to_string());
                None
            },
            None => {
                self.pending_lines.push(line.to_string());
                let statement = self.pending_lines.iter()
                    .filter(|line| !line.is_empty())
                    .cloned()
                    .collect::<Vec<String>>()
                    .join(" ");
                self.pending_lines.clear();
                Some(statement)
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending_lines.clear();
    }
}
