//! Ordering and merging of emitted declarations into one document

use crate::config::GeneratorConfig;
use crate::model::EmittedDeclaration;
use crate::shape::is_library_temporal;

/// Presentation bucket of a declaration, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclarationGroup {
    /// Name ends with a request suffix
    Primary,
    /// Used by some primary declaration
    PrimaryDependency,
    /// Name ends with a response suffix, or used by such a declaration
    Response,
    Other,
}

/// Groups and concatenates the declarations of one traversal.
///
/// Grouping is best-effort text matching; only the exclusion of library
/// date/time types and the one-declaration-per-class rule are guaranteed.
pub struct DocumentAssembler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Drop excluded declarations and order the rest by group, keeping
    /// discovery order within a group
    pub fn arrange<'d, I>(&self, declarations: I) -> Vec<(DeclarationGroup, &'d EmittedDeclaration)>
    where
        I: IntoIterator<Item = &'d EmittedDeclaration>,
    {
        let entries: Vec<(&'d EmittedDeclaration, String)> = declarations
            .into_iter()
            .filter(|decl| !is_library_temporal(&decl.qualified_name))
            .map(|decl| (decl, decl.exported()))
            .collect();

        let primaries: Vec<(&str, &str)> = entries
            .iter()
            .filter(|(decl, _)| self.config.is_request_name(&decl.simple_name))
            .map(|(decl, content)| (decl.simple_name.as_str(), content.as_str()))
            .collect();
        let responses: Vec<(&str, &str)> = entries
            .iter()
            .filter(|(decl, _)| {
                !self.config.is_request_name(&decl.simple_name)
                    && self.config.is_response_name(&decl.simple_name)
            })
            .map(|(decl, content)| (decl.simple_name.as_str(), content.as_str()))
            .collect();

        let mut arranged: Vec<(DeclarationGroup, &'d EmittedDeclaration)> = entries
            .iter()
            .map(|(decl, content)| {
                let name = decl.simple_name.as_str();
                let used_by = |owners: &[(&str, &str)]| {
                    owners.iter().any(|(owner, owner_content)| {
                        *owner != name && is_dependency(owner, name, owner_content, content)
                    })
                };
                let group = if self.config.is_request_name(name) {
                    DeclarationGroup::Primary
                } else if used_by(&primaries) {
                    DeclarationGroup::PrimaryDependency
                } else if self.config.is_response_name(name) || used_by(&responses) {
                    DeclarationGroup::Response
                } else {
                    DeclarationGroup::Other
                };
                (group, *decl)
            })
            .collect();

        // stable: discovery order survives within a group
        arranged.sort_by_key(|(group, _)| *group);
        arranged
    }

    /// Render arranged declarations separated by a blank line
    pub fn render(arranged: &[(DeclarationGroup, &EmittedDeclaration)]) -> String {
        arranged
            .iter()
            .map(|(_, decl)| decl.exported())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Arrange and render in one step
    pub fn assemble<'d, I>(&self, declarations: I) -> String
    where
        I: IntoIterator<Item = &'d EmittedDeclaration>,
    {
        Self::render(&self.arrange(declarations))
    }
}

/// Substring containment between two declarations' names and contents
fn is_dependency(owner: &str, candidate: &str, owner_content: &str, candidate_content: &str) -> bool {
    owner.contains(candidate)
        || candidate_content.contains(owner)
        || owner_content.contains(candidate)
}
