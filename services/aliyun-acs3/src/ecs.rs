//! ECS operations expressed as ready-to-sign requests.

use crate::constants::{QUERY_ACTION, QUERY_VERSION};
use crate::descriptor::RequestDescriptor;
use reqsign_core::Result;

/// API version of the ECS OpenAPI.
pub const API_VERSION: &str = "2014-05-26";

/// Operation is one ECS API call.
///
/// JSON encoded arguments are merged into the query parameters as is, so
/// nested values go through the usual flattening when signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List the available regions, also used to verify a credential.
    DescribeRegions,
    /// List instances matching a JSON object of filters, `""` means no filter.
    DescribeInstances {
        /// e.g. `{"InstanceIds": ["i-1", "i-2"]}`.
        filters_json: String,
    },
    /// Fetch the rules of a security group.
    DescribeSecurityGroupAttribute {
        /// Security group to inspect.
        security_group_id: String,
    },
    /// Modify an existing rule of a security group.
    ModifySecurityGroupRule {
        /// Security group that owns the rule.
        security_group_id: String,
        /// Rule to modify.
        security_group_rule_id: String,
        /// JSON object with the rule fields to change.
        rule_json: String,
    },
}

impl Operation {
    /// Value of the `Action` query parameter.
    pub fn action(&self) -> &'static str {
        match self {
            Operation::DescribeRegions => "DescribeRegions",
            Operation::DescribeInstances { .. } => "DescribeInstances",
            Operation::DescribeSecurityGroupAttribute { .. } => "DescribeSecurityGroupAttribute",
            Operation::ModifySecurityGroupRule { .. } => "ModifySecurityGroupRule",
        }
    }

    /// Build a `GET` request for this operation in `region`.
    ///
    /// `Action` and `Version` are set last so JSON arguments can't override them.
    ///
    /// The request carries no host: the signer derives it from the
    /// credential's region unless the caller sets one.
    pub fn into_request(self, region: &str) -> Result<RequestDescriptor> {
        let action = self.action();
        let mut req = RequestDescriptor::new().with_query("RegionId", region);

        req = match self {
            // Regions are listed globally.
            Operation::DescribeRegions => RequestDescriptor::new().with_query("Format", "JSON"),
            Operation::DescribeInstances { filters_json } if filters_json.trim().is_empty() => req,
            Operation::DescribeInstances { filters_json } => req.with_query_json(&filters_json)?,
            Operation::DescribeSecurityGroupAttribute { security_group_id } => {
                req.with_query("SecurityGroupId", security_group_id)
            }
            Operation::ModifySecurityGroupRule {
                security_group_id,
                security_group_rule_id,
                rule_json,
            } => req
                .with_query("SecurityGroupId", security_group_id)
                .with_query("SecurityGroupRuleId", security_group_rule_id)
                .with_query_json(&rule_json)?,
        };

        Ok(req
            .with_query(QUERY_ACTION, action)
            .with_query(QUERY_VERSION, API_VERSION))
    }
}
