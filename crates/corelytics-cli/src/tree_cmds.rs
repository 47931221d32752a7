//! `corelytics domains|recipients|categories|scenarios`: browse the tree.

use anyhow::Result;

use corelytics_core::tree::TreeStore;

/// Which level to list, with the labels leading to it.
#[derive(Debug, Clone)]
pub enum Listing {
    Domains,
    Recipients {
        domain: String,
    },
    Categories {
        domain: String,
        recipient: String,
    },
    Scenarios {
        domain: String,
        recipient: String,
        category: String,
    },
}

/// Run a listing command and print the result.
pub fn run_listing(store: &TreeStore, listing: &Listing) -> Result<()> {
    print!("{}", render_listing(store, listing)?);
    Ok(())
}

/// Render a listing as a heading followed by one label per line.
pub fn render_listing(store: &TreeStore, listing: &Listing) -> Result<String> {
    let (heading, labels) = match listing {
        Listing::Domains => ("Domains".to_string(), store.domains()),
        Listing::Recipients { domain } => {
            (format!("Recipients in {domain}"), store.recipients(domain)?)
        }
        Listing::Categories { domain, recipient } => (
            format!("Categories for {domain} → {recipient}"),
            store.categories(domain, recipient)?,
        ),
        Listing::Scenarios {
            domain,
            recipient,
            category,
        } => {
            let listing = store.scenarios(domain, recipient, category)?;
            if !listing.has_scenarios {
                return Ok(format!(
                    "{domain} → {recipient} → {category} has no scenarios; \
                     generate without --scenario to use the category itself.\n"
                ));
            }
            (
                format!("Scenarios for {domain} → {recipient} → {category}"),
                listing.scenarios,
            )
        }
    };

    let mut out = format!("{heading} ({}):\n", labels.len());
    for label in labels {
        out.push_str("  ");
        out.push_str(&label);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use corelytics_test_utils::sample_store;

    use super::*;

    #[test]
    fn domains_are_listed_in_order() {
        let out = render_listing(&sample_store(), &Listing::Domains).unwrap();
        assert_eq!(out, "Domains (2):\n  Work\n  Personal\n");
    }

    #[test]
    fn categories_show_path_in_heading() {
        let out = render_listing(
            &sample_store(),
            &Listing::Categories {
                domain: "Work".to_string(),
                recipient: "Manager".to_string(),
            },
        )
        .unwrap();
        assert!(out.starts_with("Categories for Work → Manager (2):"));
        assert!(out.contains("  Schedule Change\n"));
        assert!(out.contains("  Leave\n"));
    }

    #[test]
    fn leaf_category_reports_no_scenarios() {
        let out = render_listing(
            &sample_store(),
            &Listing::Scenarios {
                domain: "Work".to_string(),
                recipient: "Manager".to_string(),
                category: "Schedule Change".to_string(),
            },
        )
        .unwrap();
        assert!(out.contains("has no scenarios"), "unexpected output: {out}");
    }

    #[test]
    fn unknown_domain_lists_alternatives() {
        let err = render_listing(
            &sample_store(),
            &Listing::Recipients {
                domain: "School".to_string(),
            },
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("domain \"School\" not found"), "unexpected error: {msg}");
        assert!(msg.contains("Work, Personal"), "unexpected error: {msg}");
    }
}
