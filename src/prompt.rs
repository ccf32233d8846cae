use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::{Error, Result};

/// Where interactive questions go and answers come from.
pub trait Prompt {
    /// Shows `question` and returns the answer line without its line ending.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Shows a line of output that needs no answer.
    fn tell(&mut self, line: &str);

    /// Yes/no question. Only `y` (any case) counts as yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.trim().eq_ignore_ascii_case("y"))
    }
}

/// Blocking prompt on the process' stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(Error::PromptClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn tell(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Answers questions from a fixed script and records everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or(Error::PromptClosed)
    }

    fn tell(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
