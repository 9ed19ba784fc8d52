#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end pipeline tests against a copy of the demo backend

mod common;

use common::{demo_project, project_with_schema, read_file, write_file};
use endpointgen::config::{resolve_config, GeneratorConfig};
use endpointgen::generator::{generate_project, GenerateOptions, GenerationScope};
use endpointgen::report::{Action, Stage};
use endpointgen::schema::load_schema;
use std::path::Path;

fn load_demo(root: &Path) -> (endpointgen::Schema, GeneratorConfig) {
    let schema_path = root.join("api/endpoints.yaml");
    let schema = load_schema(&schema_path).unwrap();
    let config = resolve_config(None, &schema_path).unwrap();
    (schema, config)
}

#[test]
fn test_demo_project_generation() {
    let project = demo_project();
    let root = project.path();
    let (schema, config) = load_demo(root);
    assert_eq!(config.terraform.function_name, "factorbacktest-api");

    let report = generate_project(&schema, &config, &GenerateOptions::new(root)).unwrap();
    assert!(!report.has_warnings(), "{report:?}");

    for file in [
        "api/backtest.resolver.go",
        "api/get_user.resolver.go",
        "api/update_contact.resolver.go",
        "api/list_strategies.resolver.go",
        "terraform/api_gateway.tf",
        "terraform/terraform.tfvars.example",
    ] {
        assert!(root.join(file).is_file(), "{file} was not generated");
    }

    let get_user = read_file(root, "api/get_user.resolver.go");
    assert!(get_user.contains(
        "type GetUserResponse struct {\n\tId    uuid.UUID `json:\"id\"`\n\tName  string    `json:\"name\"`\n\tEmail *string   `json:\"email\"`\n}\n"
    ));
    assert!(get_user.contains("func (m ApiHandler) getUser(c *gin.Context) {"));

    let backtest = read_file(root, "api/backtest.resolver.go");
    assert!(backtest.contains("\tFactorExpression     string `json:\"factor_expression\"`\n"));
    assert!(backtest.contains("\tNumSymbols           int    `json:\"num_symbols\"`\n"));
    assert!(backtest.contains("\tSharpeRatio      *float64 `json:\"sharpe_ratio\"`\n"));

    let list = read_file(root, "api/list_strategies.resolver.go");
    assert!(list.contains("type ListStrategiesResponse map[string]interface{}"));
    assert!(!list.contains("ListStrategiesRequest"));

    let routes = read_file(root, "api/api.go");
    assert!(routes.contains(
        "\tengine.POST(\"/backtest\", m.backtest)\n\
         \tengine.GET(\"/user\", m.getUser)\n\
         \tengine.POST(\"/contact\", m.updateContact)\n\
         \tengine.GET(\"/strategies\", m.listStrategies)\n\
         \n\
         \treturn engine\n"
    ));
    assert_eq!(routes.matches("m.backtest").count(), 1);

    let skipped = report.filter(Stage::Routes, Action::Skipped);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].subject, "POST /backtest");

    let tf = read_file(root, "terraform/api_gateway.tf");
    for slug in ["backtest", "user", "contact", "strategies"] {
        assert!(tf.contains(&format!("resource \"aws_api_gateway_resource\" \"{slug}\"")));
        assert!(tf.contains(&format!("    aws_api_gateway_integration.{slug},\n")));
    }
    assert!(tf.contains("default     = \"factorbacktest-api\""));

    let tfvars = read_file(root, "terraform/terraform.tfvars.example");
    assert!(tfvars.contains("lambda_function_name = \"factorbacktest-api\""));
}

#[test]
fn test_second_run_changes_nothing() {
    let project = demo_project();
    let root = project.path();
    let (schema, config) = load_demo(root);
    let options = GenerateOptions::new(root);

    generate_project(&schema, &config, &options).unwrap();
    let routes = read_file(root, "api/api.go");
    let tf = read_file(root, "terraform/api_gateway.tf");

    let report = generate_project(&schema, &config, &options).unwrap();
    assert!(!report.has_changes(), "{report:?}");
    assert_eq!(report.filter(Stage::Scaffold, Action::Skipped).len(), 4);
    assert_eq!(report.filter(Stage::Routes, Action::Unchanged).len(), 1);
    assert_eq!(report.filter(Stage::Infrastructure, Action::Unchanged).len(), 2);
    assert_eq!(read_file(root, "api/api.go"), routes);
    assert_eq!(read_file(root, "terraform/api_gateway.tf"), tf);
}

#[test]
fn test_edited_scaffold_survives_regeneration() {
    let project = demo_project();
    let root = project.path();
    let (schema, config) = load_demo(root);
    let options = GenerateOptions::new(root);
    generate_project(&schema, &config, &options).unwrap();

    let edited = "package api\n\n// hand written\n";
    write_file(root, "api/get_user.resolver.go", edited);
    generate_project(&schema, &config, &options).unwrap();
    assert_eq!(read_file(root, "api/get_user.resolver.go"), edited);
}

#[test]
fn test_schema_growth_adds_only_new_artifacts() {
    let project = project_with_schema(
        r#"
endpoints:
  - handler: getUser
    method: GET
    path: /user
"#,
    );
    let root = project.path();
    let config = GeneratorConfig::default();
    let options = GenerateOptions::new(root);
    let schema = load_schema(&root.join("api/endpoints.yaml")).unwrap();
    generate_project(&schema, &config, &options).unwrap();

    write_file(
        root,
        "api/endpoints.yaml",
        r#"
endpoints:
  - handler: getUser
    method: GET
    path: /user
  - handler: deleteOrder
    method: DELETE
    path: /order
"#,
    );
    let schema = load_schema(&root.join("api/endpoints.yaml")).unwrap();
    let report = generate_project(&schema, &config, &options).unwrap();

    let generated = report.filter(Stage::Scaffold, Action::Generated);
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].subject, "api/delete_order.resolver.go");
    assert_eq!(report.filter(Stage::Infrastructure, Action::Updated).len(), 1);

    let routes = read_file(root, "api/api.go");
    assert!(routes.contains(
        "\tengine.GET(\"/health\", m.health)\n\tengine.GET(\"/user\", m.getUser)\n\tengine.DELETE(\"/order\", m.deleteOrder)\n\n\treturn engine\n"
    ));
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = demo_project();
    let root = project.path();
    let (schema, config) = load_demo(root);
    let before = read_file(root, "api/api.go");

    let mut options = GenerateOptions::new(root);
    options.dry_run = true;
    let report = generate_project(&schema, &config, &options).unwrap();

    assert!(report.has_changes());
    assert_eq!(report.filter(Stage::Scaffold, Action::Generated).len(), 4);
    assert!(!root.join("api/get_user.resolver.go").exists());
    assert!(!root.join("terraform").exists());
    assert_eq!(read_file(root, "api/api.go"), before);
}

#[test]
fn test_scope_limits_generators() {
    let project = demo_project();
    let root = project.path();
    let (schema, config) = load_demo(root);
    let before = read_file(root, "api/api.go");

    let mut options = GenerateOptions::new(root);
    options.scope = GenerationScope {
        infrastructure: true,
        ..GenerationScope::none()
    };
    generate_project(&schema, &config, &options).unwrap();

    assert!(root.join("terraform/api_gateway.tf").exists());
    assert!(!root.join("api/get_user.resolver.go").exists());
    assert_eq!(read_file(root, "api/api.go"), before);
}

#[test]
fn test_missing_routes_file_is_a_warning() {
    let project = project_with_schema(
        r#"
endpoints:
  - handler: getUser
    method: GET
    path: /user
"#,
    );
    let root = project.path();
    std::fs::remove_file(root.join("api/api.go")).unwrap();
    let schema = load_schema(&root.join("api/endpoints.yaml")).unwrap();

    let report = generate_project(
        &schema,
        &GeneratorConfig::default(),
        &GenerateOptions::new(root),
    )
    .unwrap();
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].stage, Stage::Routes);
    assert!(warnings[0].message.contains("routes file not found"));
    assert!(root.join("api/get_user.resolver.go").exists());
    assert!(root.join("terraform/api_gateway.tf").exists());
}

#[test]
fn test_unsupported_paths_degrade_terraform_only() {
    let project = project_with_schema(
        r#"
endpoints:
  - handler: getOrder
    method: GET
    path: /orders/{id}
  - handler: getUser
    method: GET
    path: /user
"#,
    );
    let root = project.path();
    let schema = load_schema(&root.join("api/endpoints.yaml")).unwrap();
    let report = generate_project(
        &schema,
        &GeneratorConfig::default(),
        &GenerateOptions::new(root),
    )
    .unwrap();

    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].subject, "/orders/{id}");

    assert!(root.join("api/get_order.resolver.go").exists());
    assert!(read_file(root, "api/api.go").contains("engine.GET(\"/orders/{id}\", m.getOrder)"));
    let tf = read_file(root, "terraform/api_gateway.tf");
    assert!(tf.contains("\"user\""));
    assert!(!tf.contains("orders"));
}

#[test]
fn test_strict_types_fails_before_writing() {
    let project = project_with_schema(
        r#"
endpoints:
  - handler: getPrice
    method: GET
    path: /price
    response:
      amount: decimal
"#,
    );
    let root = project.path();
    let schema = load_schema(&root.join("api/endpoints.yaml")).unwrap();
    let mut config = GeneratorConfig::default();
    config.go.strict_types = true;

    let err = generate_project(&schema, &config, &GenerateOptions::new(root)).unwrap_err();
    assert!(format!("{err:#}").contains("decimal"), "{err:#}");
    assert!(!root.join("api/get_price.resolver.go").exists());
}
