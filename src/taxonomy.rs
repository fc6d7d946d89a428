// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! The category taxonomy offered to the model

use serde::{Deserialize, Serialize};

/// One main category and its subcategories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Render the taxonomy as the `{categories}` block of the prompt, one
/// `Main: sub, sub, sub` line per group.
pub fn format_for_prompt(groups: &[CategoryGroup]) -> String {
    groups
        .iter()
        .map(|group| format!("{}: {}", group.name, group.subcategories.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Built-in taxonomy used when the config file does not override it.
pub fn default_taxonomy() -> Vec<CategoryGroup> {
    fn group(name: &str, subcategories: &[&str]) -> CategoryGroup {
        CategoryGroup {
            name: name.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        group(
            "Work-Related",
            &[
                "Employment Contracts",
                "Performance Reviews",
                "Meeting Notes",
                "Technical Documentation",
                "Certifications & Training",
                "Payslips & Financial Records",
                "Project Reports",
                "Code Documentation",
                "Reference Materials",
                "Business Plans",
                "Marketing Materials",
                "Client Presentations",
                "Proposals",
                "HR Documents",
                "Company Policies",
                "Travel Expenses",
                "Sales Reports",
                "Vendor Contracts",
                "Internal Memos",
            ],
        ),
        group(
            "College/Academics",
            &[
                "Lecture Notes",
                "Assignments & Homework",
                "Research Papers",
                "Exam Papers & Solutions",
                "Course Syllabi",
                "Academic Transcripts",
                "Certificates & Diplomas",
                "College Applications",
                "Study Materials",
                "Lab Reports",
                "Thesis Documents",
                "Grant Proposals",
                "Conference Papers",
                "Academic References",
                "Research Data",
                "Project Documentation",
                "Scholarship Applications",
                "Academic Publications",
            ],
        ),
        group(
            "Personal Finance",
            &[
                "Bank Statements",
                "Tax Returns",
                "Investment Records",
                "Insurance Policies",
                "Credit Card Statements",
                "Loan Documents",
                "Property Documents",
                "Receipts & Invoices",
                "Budget Plans",
                "Retirement Plans",
                "Financial Planning",
                "Asset Documentation",
                "Mortgage Documents",
                "Vehicle Finance",
                "Cryptocurrency Records",
            ],
        ),
        group(
            "Legal Documents",
            &[
                "Contracts & Agreements",
                "Court Documents",
                "Power of Attorney",
                "Wills & Trusts",
                "Legal Correspondence",
                "Patents & Trademarks",
                "Property Deeds",
                "Business Licenses",
                "Immigration Documents",
                "Marriage Certificates",
                "Birth Certificates",
                "Legal Notices",
                "Affidavits",
                "NDAs",
                "Regulatory Compliance",
            ],
        ),
        group(
            "Healthcare",
            &[
                "Medical Records",
                "Prescriptions",
                "Lab Results",
                "Insurance Claims",
                "Vaccination Records",
                "Medical Bills",
                "Health Insurance Policies",
                "Doctor's Notes",
                "Treatment Plans",
                "Medical History",
                "Dental Records",
                "Specialist Reports",
                "Mental Health Records",
                "Fitness Plans",
                "Nutrition Plans",
            ],
        ),
        group(
            "Personal Identity",
            &[
                "Passport",
                "Driver's License",
                "Social Security",
                "Birth Certificate",
                "Marriage License",
                "Military ID",
                "Voter Registration",
                "Citizenship Documents",
                "Professional Licenses",
                "Emergency Contacts",
                "Personal References",
                "Background Checks",
            ],
        ),
        group(
            "Home & Property",
            &[
                "Property Deeds",
                "Lease Agreements",
                "Mortgage Documents",
                "Home Insurance",
                "Maintenance Records",
                "Utility Bills",
                "Renovation Plans",
                "Home Inventory",
                "Warranties",
                "Property Tax Records",
                "HOA Documents",
                "Building Permits",
                "Construction Contracts",
                "Property Surveys",
                "Home Inspections",
            ],
        ),
        group(
            "Vehicle Documents",
            &[
                "Vehicle Registration",
                "Insurance Policies",
                "Service Records",
                "Purchase Agreements",
                "Warranty Information",
                "Accident Reports",
                "Repair Records",
                "Vehicle Titles",
                "Loan Documents",
                "Fuel Logs",
                "Maintenance Schedule",
                "Vehicle Modifications",
            ],
        ),
        group(
            "Digital Assets",
            &[
                "Software Licenses",
                "Domain Registrations",
                "Digital Certificates",
                "Cryptocurrency Keys",
                "Cloud Service Agreements",
                "API Documentation",
                "Digital Product Receipts",
                "Online Subscriptions",
                "Password Records",
                "Digital Identity Documents",
                "NFT Records",
                "Digital Rights Management",
            ],
        ),
        group(
            "Travel",
            &[
                "Passports",
                "Visas",
                "Travel Insurance",
                "Itineraries",
                "Booking Confirmations",
                "Vaccination Records",
                "Travel Receipts",
                "Maps & Guides",
                "Travel Permits",
                "Currency Exchange",
                "Loyalty Programs",
                "Emergency Contacts",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_taxonomy_has_ten_groups() {
        let groups = default_taxonomy();
        assert_eq!(groups.len(), 10);
        assert!(groups.iter().all(|g| !g.subcategories.is_empty()));

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert!(names.contains(&"Healthcare"));
        assert!(names.contains(&"Legal Documents"));
        assert!(names.contains(&"Travel"));
    }

    #[test]
    fn prompt_block_lists_one_group_per_line() {
        let groups = vec![
            CategoryGroup {
                name: "Healthcare".to_string(),
                subcategories: vec!["Medical Records".to_string(), "Lab Results".to_string()],
            },
            CategoryGroup {
                name: "Travel".to_string(),
                subcategories: vec!["Visas".to_string()],
            },
        ];

        let block = format_for_prompt(&groups);
        assert_eq!(block, "Healthcare: Medical Records, Lab Results\nTravel: Visas");
    }

    #[test]
    fn prompt_block_covers_the_whole_default_taxonomy() {
        let block = format_for_prompt(&default_taxonomy());
        assert_eq!(block.lines().count(), 10);
        assert!(block.contains("Legal Documents: Contracts & Agreements"));
        assert!(block.contains("Wills & Trusts"));
    }
}
