//! Construction-time input: which templates and which pipeline a cluster
//! must carry, and the wiring that turns them into a walkable sequence.

use bytes::Bytes;

use crate::resource::{HttpResource, PublishableResource, VersionGate};
use crate::sequence::ResourceSequence;

/// One index template: a name and its definition as an opaque JSON blob.
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    pub name: String,
    pub body: Bytes,
}

impl TemplateDefinition {
    pub fn new(name: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// The ingest pipeline telemetry documents are routed through.
#[derive(Debug, Clone)]
pub struct PipelineDefinition {
    pub id: String,
    pub body: Bytes,
}

impl PipelineDefinition {
    pub fn new(id: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// Ordered set of template definitions plus the pipeline definition.
/// Registration order is the order templates are checked in.
pub struct ResourceRegistry {
    templates: Vec<TemplateDefinition>,
    pipeline: PipelineDefinition,
}

impl ResourceRegistry {
    pub fn new(pipeline: PipelineDefinition) -> Self {
        Self {
            templates: Vec::new(),
            pipeline,
        }
    }

    pub fn register_template(&mut self, template: TemplateDefinition) {
        self.templates.push(template);
    }

    pub fn templates(&self) -> &[TemplateDefinition] {
        &self.templates
    }

    pub fn pipeline(&self) -> &PipelineDefinition {
        &self.pipeline
    }

    /// Wire the registry into a sequence: version gate first, templates in
    /// registration order, pipeline last.
    pub fn into_sequence(
        self,
        compatible: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> ResourceSequence {
        let mut resources = Vec::with_capacity(self.templates.len() + 2);

        resources.push(HttpResource::Version(VersionGate::new(compatible)));

        for template in self.templates {
            let endpoint = format!("/_template/{}", template.name);
            resources.push(HttpResource::Template(PublishableResource::new(
                template.name,
                endpoint,
                template.body,
            )));
        }

        let endpoint = format!("/_ingest/pipeline/{}", self.pipeline.id);
        resources.push(HttpResource::Pipeline(PublishableResource::new(
            self.pipeline.id,
            endpoint,
            self.pipeline.body,
        )));

        ResourceSequence::new(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> PipelineDefinition {
        PipelineDefinition::new("telemetry", Bytes::from_static(b"{}"))
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = ResourceRegistry::new(pipeline());
        registry.register_template(TemplateDefinition::new("b", Bytes::from_static(b"{}")));
        registry.register_template(TemplateDefinition::new("a", Bytes::from_static(b"{}")));

        let names: Vec<_> = registry.templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn sequence_starts_dirty() {
        let registry = ResourceRegistry::new(pipeline());
        let sequence = registry.into_sequence(|_| true);
        assert!(sequence.is_dirty());
    }
}
