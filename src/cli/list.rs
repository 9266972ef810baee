use super::ui;
use crate::core::catalog::InstanceType;
use crate::core::config::DisplaySettings;
use crate::core::filters;
use crate::core::pricing::PricingCalculator;
use crate::core::sort::sort_instances;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the catalog as a table ordered per `settings`, at most `limit` rows.
pub fn render(
    instances: &[InstanceType],
    settings: &DisplaySettings,
    limit: Option<usize>,
) -> String {
    let calc = PricingCalculator::new(settings);
    let period = settings.period;

    let mut table = ui::new_styled_table();
    let emr_header = if settings.emr_percent {
        "EMR (%)".to_string()
    } else {
        format!("EMR ({period})")
    };
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Size"),
        ui::header_cell("vCPUs"),
        ui::header_cell("Memory (GiB)"),
        ui::header_cell("Disk"),
        ui::header_cell("Network"),
        ui::header_cell(&format!("On-demand ({period})")),
        ui::header_cell(&format!("Reserved ({period})")),
        ui::header_cell("Upfront"),
        ui::header_cell("Savings"),
        ui::header_cell(&format!("Spot ({period})")),
        ui::header_cell(&emr_header),
        ui::header_cell(&format!("EBS-optimized ({period})")),
    ]);

    let sorted = sort_instances(instances, settings);
    let shown = limit.unwrap_or(sorted.len());
    for instance in sorted.iter().take(shown) {
        let savings = 1.0 - calc.reserved_savings(instance);
        let emr = if settings.emr_percent {
            filters::format_percent(Some(calc.emr_price_percent(instance)))
        } else {
            filters::format_price(calc.emr_price(instance))
        };

        table.add_row(vec![
            ui::name_cell(
                &instance.api_name,
                settings.calculator && instance.is_selected(),
            ),
            Cell::new(filters::short_size_code(&instance.api_name)),
            ui::figure_cell(instance.vcpus.to_string()),
            ui::figure_cell(instance.memory.to_string()),
            ui::figure_cell(filters::format_disk(instance.disk.as_ref())),
            Cell::new(&instance.network_performance),
            ui::figure_cell(filters::format_price(calc.on_demand_price(instance))),
            ui::figure_cell(filters::format_price(calc.reserved_price(instance))),
            ui::figure_cell(filters::format_price(calc.upfront_cost(instance))),
            ui::figure_cell(filters::format_percent(Some(savings))),
            ui::figure_cell(filters::format_price(calc.spot_price(instance))),
            ui::figure_cell(emr),
            ui::figure_cell(filters::format_price(calc.ebs_optimized_price(instance))),
        ]);
    }

    let mut output = format!(
        "Region: {}  OS: {}\n\n",
        ui::style_text(&settings.region, ui::StyleType::Title),
        ui::style_text(&settings.operating_system, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    if shown < sorted.len() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("{} more instance types not shown", sorted.len() - shown),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

pub fn run(
    instances: &[InstanceType],
    settings: &DisplaySettings,
    limit: Option<usize>,
) -> Result<()> {
    if instances.is_empty() {
        println!("No instance types found in the catalog.");
        return Ok(());
    }
    println!("{}", render(instances, settings, limit));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{DiskDescriptor, RawPrice};
    use crate::core::period::Period;
    use std::collections::HashMap;

    fn catalog() -> Vec<InstanceType> {
        let mut labels = HashMap::new();
        labels.insert("linux".to_string(), RawPrice::Hourly(0.1));
        let mut classes = HashMap::new();
        classes.insert("onDemand".to_string(), labels);
        let mut prices = HashMap::new();
        prices.insert("us-east-1".to_string(), classes);

        vec![
            InstanceType {
                api_name: "m4.xlarge".to_string(),
                vcpus: 4.0,
                memory: 16.0,
                disk: Some(DiskDescriptor {
                    disks: 1,
                    size: 80.0,
                    ssd: true,
                }),
                network_performance: "high".to_string(),
                prices,
                quantity: None,
            },
            InstanceType {
                api_name: "m4.large".to_string(),
                vcpus: 2.0,
                memory: 8.0,
                disk: None,
                network_performance: "moderate".to_string(),
                prices: HashMap::new(),
                quantity: None,
            },
        ]
    }

    #[test]
    fn test_render_orders_and_formats_rows() {
        console::set_colors_enabled(false);
        let settings = DisplaySettings {
            period: Period::Daily,
            ..DisplaySettings::default()
        };
        let output = render(&catalog(), &settings, None);

        let large = output.find("m4.large").expect("m4.large row");
        let xlarge = output.find("m4.xlarge").expect("m4.xlarge row");
        assert!(large < xlarge);
        assert!(output.contains("On-demand (daily)"));
        assert!(output.contains("$2.400"));
        assert!(output.contains("m4.xl"));
        assert!(output.contains("n/a"));
    }

    #[test]
    fn test_render_respects_limit() {
        console::set_colors_enabled(false);
        let output = render(&catalog(), &DisplaySettings::default(), Some(1));
        assert!(output.contains("m4.large"));
        assert!(!output.contains("m4.xlarge"));
        assert!(output.contains("1 more instance types not shown"));
    }
}
