use askama::Template;

/// A Go struct type with its members already aligned gofmt-style
#[derive(Debug, Clone)]
pub struct StructDef {
    /// Type name, e.g. `GetUserResponse`
    pub name: String,
    /// Member lines without the leading tab
    pub members: Vec<String>,
}

/// Template data for one `<handler>.resolver.go` scaffold
#[derive(Template)]
#[template(path = "resolver.go.txt", escape = "none")]
pub struct ResolverTemplate {
    /// `package` clause
    pub package: String,
    /// HTTP verb, for the header comment
    pub method: String,
    /// Route path, for the header comment
    pub path: String,
    /// Import paths grouped std / module / third-party, one blank line between groups
    pub import_groups: Vec<Vec<String>>,
    /// Request body type; `None` when the endpoint declares no request fields
    pub request: Option<StructDef>,
    /// Response type; no members means the open map form
    pub response: StructDef,
    /// Go spelling of the open map type
    pub open_map: String,
    pub receiver: String,
    pub receiver_type: String,
    pub handler: String,
}

/// One endpoint's API Gateway resource, method and integration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResources {
    /// Terraform resource name shared by the three resources
    pub slug: String,
    /// Route path, for the comment above the resources
    pub path: String,
    /// HCL-escaped `path_part`
    pub path_part: String,
    /// HTTP verb
    pub method: String,
}

impl EndpointResources {
    pub fn resource_address(&self) -> String {
        format!("aws_api_gateway_resource.{}", self.slug)
    }

    pub fn method_address(&self) -> String {
        format!("aws_api_gateway_method.{}", self.slug)
    }

    pub fn integration_address(&self) -> String {
        format!("aws_api_gateway_integration.{}", self.slug)
    }
}

/// Template data for `api_gateway.tf`
#[derive(Template)]
#[template(path = "api_gateway.tf.txt", escape = "none")]
pub struct TerraformTemplate {
    /// Schema file, for the header comment
    pub schema: String,
    pub function_name: String,
    pub region: String,
    pub stage: String,
    pub resources: Vec<EndpointResources>,
    /// Addresses the deployment waits on, in endpoint order
    pub dependencies: Vec<String>,
}

/// Template data for `terraform.tfvars.example`
#[derive(Template)]
#[template(path = "terraform.tfvars.example.txt", escape = "none")]
pub struct TfvarsExampleTemplate {
    pub function_name: String,
    pub region: String,
}

/// Render a template, normalizing the output to end in exactly one newline
///
/// # Errors
///
/// Propagates askama rendering errors.
pub fn render_file<T: Template>(template: &T) -> anyhow::Result<String> {
    let mut rendered = template.render()?;
    let trimmed = rendered.trim_end_matches('\n').len();
    rendered.truncate(trimmed);
    rendered.push('\n');
    Ok(rendered)
}
