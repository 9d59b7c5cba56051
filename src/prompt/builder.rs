use super::engine::TeraEngine;
use crate::persona::{Mode, PersonaPolicy, fallback_sentence};
use crate::store::{IdentityCard, WritingSample};
use tera::Context;

const IDENTITY_TEMPLATE: &str = "\
Authoritative identity (treat as fact, never contradict):\
{% if summary %}\n{{ summary }}{% endif %}\
{% if bio %}\n{{ bio }}{% endif %}";

const SAMPLES_TEMPLATE: &str = "\
{{ header }}\n\n\
{% for sample in samples %}{{ sample.content }}\nContext: {{ sample.context }}\
{% if not loop.last %}\n\n{% endif %}{% endfor %}";

const CONSTRAINTS_TEMPLATE: &str = "\
Critical constraints:
- Do NOT invent biography details (age, school, city, title) unless present in the identity, style or knowledge data.
- If asked about unknown personal details, reply with \"{{ fallback }}\".
- Keep tone {{ mode }} and consistent with the style examples.";

const IDENTITY_NAME: &str = "identity";
const SAMPLES_NAME: &str = "samples";
const CONSTRAINTS_NAME: &str = "constraints";

const IDENTITY_SEPARATOR: &str = " | ";
const KNOWLEDGE_HEADER: &str =
    "Use the following knowledge/context when relevant (do not quote verbatim unless asked):";

/// Assembles the system message for one completion call.
pub struct PromptBuilder {
    engine: TeraEngine,
    policy: PersonaPolicy,
}

impl PromptBuilder {
    pub fn new(policy: PersonaPolicy) -> anyhow::Result<Self> {
        let engine = TeraEngine::with_templates(&[
            (IDENTITY_NAME, IDENTITY_TEMPLATE),
            (SAMPLES_NAME, SAMPLES_TEMPLATE),
            (CONSTRAINTS_NAME, CONSTRAINTS_TEMPLATE),
        ])?;
        Ok(Self { engine, policy })
    }

    pub fn policy(&self) -> &PersonaPolicy {
        &self.policy
    }

    /// Sections in order: persona instructions, identity (if any), style or
    /// its fallback, knowledge (if any), constraints. Sections are separated
    /// by one blank line.
    pub fn build(
        &self,
        mode: Mode,
        identity: &IdentityCard,
        style: &[WritingSample],
        knowledge: &[WritingSample],
    ) -> anyhow::Result<String> {
        let mut sections = vec![self.policy.instructions(mode).trim_end().to_string()];

        if !identity.is_empty() {
            sections.push(self.identity_block(identity)?);
        }

        if style.is_empty() {
            sections.push(format!(
                "There are currently no saved style examples for this mode. \
                 Rely strictly on the baseline persona and maintain a {mode} tone."
            ));
        } else {
            let header = format!(
                "Here are examples of {}'s {mode} writing style. Match this tone exactly:",
                self.policy.name()
            );
            sections.push(self.samples_block(&header, style)?);
        }

        if !knowledge.is_empty() {
            sections.push(self.samples_block(KNOWLEDGE_HEADER, knowledge)?);
        }

        let mut ctx = Context::new();
        ctx.insert("fallback", fallback_sentence(mode));
        ctx.insert("mode", mode.as_str());
        sections.push(self.engine.render(CONSTRAINTS_NAME, &ctx)?);

        Ok(sections.join("\n\n"))
    }

    fn identity_block(&self, identity: &IdentityCard) -> anyhow::Result<String> {
        let summary = [identity.name(), identity.occupation(), identity.location()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(IDENTITY_SEPARATOR);

        let mut ctx = Context::new();
        ctx.insert("summary", &summary);
        ctx.insert("bio", identity.bio().unwrap_or_default());
        self.engine.render(IDENTITY_NAME, &ctx)
    }

    fn samples_block(&self, header: &str, samples: &[WritingSample]) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("header", header);
        ctx.insert("samples", samples);
        self.engine.render(SAMPLES_NAME, &ctx)
    }
}

/// Build the system prompt for the default persona.
pub fn build_system_prompt(
    mode: Mode,
    identity: &IdentityCard,
    style: &[WritingSample],
    knowledge: &[WritingSample],
) -> anyhow::Result<String> {
    PromptBuilder::new(PersonaPolicy::default())?.build(mode, identity, style, knowledge)
}
