//! Property tests: registration is last-write-wins.

use std::collections::HashMap;

use proptest::prelude::*;
use vigil_core::{ResourceMetadata, SupportCriterion};
use vigil_plugin::ResourceRegistry;
use vigil_resource::{Context, Resource, ResourceEvent, ResourceResult};

struct Tagged<const N: u8>;

impl<const N: u8> Resource for Tagged<N> {
    type Params = ();

    async fn init(_ctx: &Context, _params: ()) -> ResourceResult<Self> {
        Ok(Self)
    }
}

const NAMES: [&str; 4] = ["file", "user", "aws_vpc", "iis_site"];
const FAMILIES: [&str; 3] = ["windows", "linux", "cloud"];

fn criteria(variant: u8) -> Vec<SupportCriterion> {
    FAMILIES
        .iter()
        .take(variant as usize)
        .map(|family| SupportCriterion::family(*family))
        .collect()
}

fn register(registry: &ResourceRegistry, name: &str, variant: u8) {
    let meta = criteria(variant)
        .into_iter()
        .fold(ResourceMetadata::builder(name), |b, c| b.supports(c))
        .build()
        .unwrap();
    match variant {
        0 => registry.register::<Tagged<0>>(meta),
        1 => registry.register::<Tagged<1>>(meta),
        2 => registry.register::<Tagged<2>>(meta),
        _ => registry.register::<Tagged<3>>(meta),
    };
}

proptest! {
    #[test]
    fn last_registration_wins(
        ops in proptest::collection::vec((0..NAMES.len(), 0u8..4), 1..24),
    ) {
        let registry = ResourceRegistry::new();
        let mut events = registry.events().subscribe();
        let mut last: HashMap<&str, u8> = HashMap::new();

        for (idx, variant) in &ops {
            register(&registry, NAMES[*idx], *variant);
            last.insert(NAMES[*idx], *variant);
        }

        prop_assert_eq!(registry.len(), last.len());
        for (name, variant) in &last {
            let ty = registry.lookup(name).unwrap();
            let tag = format!("Tagged<{variant}>");
            prop_assert!(ty.type_name().ends_with(&tag), "{} vs {}", ty.type_name(), tag);
            prop_assert_eq!(registry.supports_for(name).to_vec(), criteria(*variant));
        }

        let mut overwritten = 0;
        let mut registered = 0;
        while let Ok(event) = events.try_recv() {
            match event {
                ResourceEvent::Overwritten { .. } => overwritten += 1,
                ResourceEvent::Registered { .. } => registered += 1,
                other => prop_assert!(false, "unexpected event {:?}", other),
            }
        }
        prop_assert_eq!(registered, last.len());
        prop_assert_eq!(overwritten, ops.len() - last.len());
    }
}
