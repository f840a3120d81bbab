use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{NotesPolicy, RecurrenceTemplate, SlotInstance, TemplateKey};

/// All future occurrences of one template seen in the store.
#[derive(Debug, Clone)]
pub struct TemplateGroup {
    pub template: RecurrenceTemplate,
    pub instance_count: usize,
    /// Occurrence with the greatest start time (the end of known coverage).
    pub latest_instance: SlotInstance,
}

/// Keyed and iterated in key order, so maintenance visits templates
/// deterministically.
pub type TemplateMap = BTreeMap<TemplateKey, TemplateGroup>;

/// Groups active, recurring, future instances into their templates.
///
/// Anything else in `instances` is ignored. Attributes outside the key
/// (notes under [`NotesPolicy::Ignore`], the mentor application id) follow
/// the latest occurrence.
pub fn group_instances<I>(instances: I, now: DateTime<Utc>, policy: NotesPolicy) -> TemplateMap
where
    I: IntoIterator<Item = SlotInstance>,
{
    let mut groups = TemplateMap::new();

    for instance in instances {
        if !instance.is_recurring || !instance.is_active || instance.start_time <= now {
            continue;
        }

        let template = RecurrenceTemplate::from_instance(&instance);
        let key = template.key(policy);

        match groups.get_mut(&key) {
            Some(group) => {
                group.instance_count += 1;
                if instance.start_time > group.latest_instance.start_time {
                    group.template = template;
                    group.latest_instance = instance;
                }
            }
            None => {
                groups.insert(
                    key,
                    TemplateGroup {
                        template,
                        instance_count: 1,
                        latest_instance: instance,
                    },
                );
            }
        }
    }

    groups
}
