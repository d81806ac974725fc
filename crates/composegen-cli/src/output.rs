//! Formatted output helpers for CLI commands.

use std::fmt::Write;

use composegen_compose::model::ComposeConfig;
use composegen_compose::stacks::StackKind;

/// Formats the stack catalogue, one aligned line per stack.
#[must_use]
pub fn format_stack_list(stacks: &[StackKind]) -> String {
    let width = stacks.iter().map(|s| s.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for stack in stacks {
        let _ = writeln!(out, "  {:<width$}  {}", stack.name(), stack.description());
    }
    out
}

/// Formats a startup plan: services in `order`, each with its image and
/// the conditions it waits on.
#[must_use]
pub fn format_plan(stack: &str, config: &ComposeConfig, order: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Startup plan for: {stack}");
    let _ = writeln!(out, "{}", "\u{2550}".repeat(40));

    for (step, name) in order.iter().enumerate() {
        let Some(service) = config.service(name) else {
            continue;
        };
        let _ = writeln!(out, "  {}. {name}", step + 1);
        let _ = writeln!(out, "      image: {}", service.image());
        if let Some(ports) = service.ports() {
            let _ = writeln!(out, "      ports: {}", ports.join(", "));
        }
        for dep in service.dependency_names() {
            if let Some(condition) = service.dependency(dep) {
                let _ = writeln!(out, "      after: {dep} ({condition})");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} service(s) will be started.", order.len());
    if let Some(volumes) = config.volumes() {
        let names: Vec<&str> = volumes.keys().map(String::as_str).collect();
        let _ = writeln!(out, "  Volumes: {}", names.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn stack_list_aligns_descriptions() {
        let out = format_stack_list(&[StackKind::PrismTest, StackKind::UniversalResolver]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  prism-test          "), "got: {out}");
        assert!(lines[1].starts_with("  universal-resolver  "), "got: {out}");
    }

    #[test]
    fn plan_lists_services_in_order_with_conditions() {
        let config = StackKind::UniversalResolver
            .build(None, "0.1.0")
            .expect("build");
        let order = config.startup_order().expect("order");
        let out = format_plan("universal-resolver", &config, &order);

        let db = out.find(". db\n").expect("db");
        let indexer = out.find(". neoprism-indexer\n").expect("indexer");
        assert!(db < indexer, "got: {out}");
        assert!(out.contains("after: db (service_healthy)"), "got: {out}");
        assert!(out.contains("3 service(s) will be started."), "got: {out}");
        assert!(!out.contains("Volumes:"), "got: {out}");
    }

    #[test]
    fn plan_lists_declared_volumes() {
        let config = StackKind::PrismTest.build(None, "0.1.0").expect("build");
        let order = config.startup_order().expect("order");
        let out = format_plan("prism-test", &config, &order);
        assert!(out.contains("Volumes: node-testnet"), "got: {out}");
    }
}
