//! Worker roster parsing.
//!
//! ```kdl
//! roster {
//!     worker "Priya Sharma" rating=4.9 completed-jobs=203 phone="+91 98765 43211" {
//!         skills "Sales Assistant" "Product Display"
//!     }
//! }
//! ```

use kdl::KdlNode;
use std::collections::{BTreeSet, HashSet};
use workbee_core::{WorkerId, WorkerProfile};

use crate::nodes::{
    get_all_string_args, get_first_string_arg, get_number_prop, get_string_prop, get_u64_prop,
};
use crate::{ConfigError, ConfigResult};

pub(crate) fn parse_roster(node: &KdlNode) -> ConfigResult<Vec<WorkerProfile>> {
    let mut workers = Vec::new();
    let mut names = HashSet::new();

    let Some(children) = node.children() else {
        return Ok(workers);
    };

    for child in children.nodes() {
        if child.name().value() != "worker" {
            continue;
        }
        let worker = parse_worker(child)?;
        if !names.insert(worker.name.to_lowercase()) {
            return Err(ConfigError::Duplicate(format!("roster worker '{}'", worker.name)));
        }
        workers.push(worker);
    }

    Ok(workers)
}

fn parse_worker(node: &KdlNode) -> ConfigResult<WorkerProfile> {
    let name = get_first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField("worker name".to_string()))?;

    let id = match get_string_prop(node, "id") {
        Some(raw) => raw.parse::<WorkerId>().map_err(|e| ConfigError::InvalidValue {
            field: format!("id of worker '{}'", name),
            message: e.to_string(),
        })?,
        None => WorkerId::new(),
    };

    let rating = get_number_prop(node, "rating")?.unwrap_or(0.0) as f32;
    let completed_jobs = get_u64_prop(node, "completed-jobs")?.unwrap_or(0);
    let completed_jobs = u32::try_from(completed_jobs).map_err(|_| ConfigError::InvalidValue {
        field: "completed-jobs".to_string(),
        message: format!("{} is too large", completed_jobs),
    })?;
    let phone = get_string_prop(node, "phone").unwrap_or_default();

    let mut skills = BTreeSet::new();
    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() == "skills" {
                skills.extend(get_all_string_args(child));
            }
        }
    }

    let worker = WorkerProfile {
        id,
        name,
        rating,
        completed_jobs,
        skills,
        phone,
    };

    worker.validate().map_err(|e| ConfigError::InvalidValue {
        field: format!("worker '{}'", worker.name),
        message: e.to_string(),
    })?;

    Ok(worker)
}

#[cfg(test)]
mod tests {
    use crate::{ConfigError, parse_config};

    #[test]
    fn test_parse_roster() {
        let kdl = r#"
            roster {
                worker "Priya Sharma" rating=4.9 completed-jobs=203 phone="+91 98765 43211" {
                    skills "Sales Assistant" "Product Display"
                }
                worker "Rajesh Kumar" rating=5 completed-jobs=156 {
                    skills "Cashier" "Customer Service"
                }
            }
        "#;

        let config = parse_config(kdl).unwrap();
        assert_eq!(config.roster.len(), 2);

        let priya = &config.roster[0];
        assert_eq!(priya.name, "Priya Sharma");
        assert!((priya.rating - 4.9).abs() < 1e-4);
        assert_eq!(priya.completed_jobs, 203);
        assert!(priya.skills.contains("Product Display"));

        let rajesh = &config.roster[1];
        assert_eq!(rajesh.rating, 5.0);
        assert_eq!(rajesh.phone, "");
    }

    #[test]
    fn test_fixed_worker_id() {
        let kdl = r#"
            roster {
                worker "Asha" id="0190f5c2-3b7e-7c1a-9d4e-1a2b3c4d5e6f" {
                    skills "Cashier"
                }
            }
        "#;
        let config = parse_config(kdl).unwrap();
        assert_eq!(
            config.roster[0].id.to_string(),
            "0190f5c2-3b7e-7c1a-9d4e-1a2b3c4d5e6f"
        );
    }

    #[test]
    fn test_worker_without_skills_rejected() {
        let kdl = r#"roster { worker "Asha" rating=4.0; }"#;
        assert!(matches!(
            parse_config(kdl).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let kdl = r#"roster { worker "Asha" rating=7 { skills "Cashier"; } }"#;
        assert!(parse_config(kdl).is_err());
    }

    #[test]
    fn test_duplicate_worker_rejected() {
        let kdl = r#"
            roster {
                worker "Asha" { skills "Cashier"; }
                worker "asha" { skills "Sales Assistant"; }
            }
        "#;
        assert!(matches!(
            parse_config(kdl).unwrap_err(),
            ConfigError::Duplicate(_)
        ));
    }
}
