use super::*;

struct Fixed(MontageResult<String>);

impl PromptElaborator for Fixed {
    fn elaborate(&self, _prompt: &str, _tags: &[TagId]) -> MontageResult<Elaboration> {
        Ok(Elaboration::Nothing)
    }

    fn refine(&self, _original: &str, _feedback: &str) -> MontageResult<String> {
        match &self.0 {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(MontageError::collaborator(e.to_string())),
        }
    }
}

#[test]
fn no_elaborator_yields_nothing() {
    assert_eq!(
        NoElaborator.elaborate("@a", &[TagId::new("a")]).unwrap(),
        Elaboration::Nothing
    );
}

#[test]
fn refine_uses_collaborator_output() {
    let e = Fixed(Ok("  bigger @a on red  ".to_string()));
    assert_eq!(refine_prompt(&e, "@a", "bigger"), "bigger @a on red");
}

#[test]
fn refine_falls_back_on_error_or_empty() {
    assert_eq!(
        refine_prompt(&NoElaborator, "@a on blue background", "make it pop"),
        "@a on blue background, make it pop, improved version"
    );
    let e = Fixed(Ok("   ".to_string()));
    assert_eq!(refine_prompt(&e, "x", "y"), "x, y, improved version");
}
