use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::agents::{LanguageModel, PromptBuilder};
use crate::products::{write_product_list, ProductList};
use crate::ProductQueryError;

pub const INPUT_PROMPT: &str = "Enter your product query (or type 'exit' to quit): ";
pub const EXIT_COMMAND: &str = "exit";

/// What the loop does after handling one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

pub struct QueryLoop<M> {
    model: M,
    prompt_builder: PromptBuilder,
    show_raw_output: bool,
}

impl<M: LanguageModel> QueryLoop<M> {
    pub fn new(model: M, prompt_builder: PromptBuilder) -> Self {
        Self {
            model,
            prompt_builder,
            show_raw_output: true,
        }
    }

    pub fn show_raw_output(mut self, enabled: bool) -> Self {
        self.show_raw_output = enabled;
        self
    }

    /// Read queries until `exit` or end of input. Only console I/O errors escape.
    pub async fn run<R, W>(&self, mut input: R, out: &mut W) -> Result<(), ProductQueryError>
    where
        R: BufRead,
        W: Write,
    {
        let mut line = String::new();
        loop {
            write!(out, "{}", INPUT_PROMPT)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                writeln!(out, "Exiting...")?;
                return Ok(());
            }

            if self.handle_line(&line, out).await? == Step::Exit {
                return Ok(());
            }
        }
    }

    pub async fn handle_line<W: Write>(
        &self,
        line: &str,
        out: &mut W,
    ) -> Result<Step, ProductQueryError> {
        let query = line.trim();
        if query.eq_ignore_ascii_case(EXIT_COMMAND) {
            writeln!(out, "Exiting...")?;
            return Ok(Step::Exit);
        }
        if query.is_empty() {
            return Ok(Step::Continue);
        }

        match self.answer(query, out).await {
            Ok(products) => {
                debug!(query = %query, count = products.len(), "Parsed product list");
                write_product_list(out, &products)?;
            }
            Err(ProductQueryError::Io(e)) => return Err(ProductQueryError::Io(e)),
            Err(e) => {
                warn!(query = %query, error = %e, "Query failed");
                writeln!(out, "Failed to parse response: {}", e)?;
            }
        }
        Ok(Step::Continue)
    }

    async fn answer<W: Write>(
        &self,
        query: &str,
        out: &mut W,
    ) -> Result<ProductList, ProductQueryError> {
        let prompt = self.prompt_builder.build(query);
        let raw_text = self.model.invoke(&prompt).await?;

        if self.show_raw_output {
            writeln!(out, "\nRaw model output:\n {} \n", raw_text)?;
        }

        ProductList::parse(&raw_text)
    }
}
