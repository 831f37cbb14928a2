//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{GradcheckError, Result};

use super::{parse_bool, Prompt, PromptResult, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> GradcheckError {
    GradcheckError::Io(e.into())
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = confirm_default(prompt);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new().with_prompt(&prompt.question);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result.trim().to_string()))
}

/// Default answer of a confirm prompt; unparseable defaults mean "no".
pub(crate) fn confirm_default(prompt: &Prompt) -> bool {
    prompt
        .default
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(false)
}
