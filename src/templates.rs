// src/templates.rs
use minijinja::Environment;
use serde::Serialize;

pub const INDEX: &str = "polls/index.html";
pub const DETAIL: &str = "polls/detail.html";
pub const RESULTS: &str = "polls/results.html";

/// Static body served for every 404.
pub const NOT_FOUND_PAGE: &str = include_str!("../templates/polls/not_found.html");

/// Page templates, compiled into the binary. The `.html` names switch on
/// minijinja's HTML auto-escaping.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("polls/base.html", include_str!("../templates/polls/base.html"))?;
        env.add_template(INDEX, include_str!("../templates/polls/index.html"))?;
        env.add_template(DETAIL, include_str!("../templates/polls/detail.html"))?;
        env.add_template(RESULTS, include_str!("../templates/polls/results.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn detail_escapes_error_message() {
        let templates = Templates::new().unwrap();
        let body = templates
            .render(
                DETAIL,
                context! {
                    question => context! { id => 1, question_text => "Q" },
                    choices => Vec::<()>::new(),
                    error_message => "You didn't select a choice.",
                },
            )
            .unwrap();
        assert!(body.contains("You didn&#x27;t select a choice."));
    }

    #[test]
    fn empty_index_says_so() {
        let templates = Templates::new().unwrap();
        let body = templates
            .render(INDEX, context! { latest_question_list => Vec::<()>::new() })
            .unwrap();
        assert!(body.contains("No polls are available."));
    }
}
