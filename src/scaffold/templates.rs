//! Embedded scaffolding templates
//!
//! Source templates for lambda packages and the Terraform resources that
//! deploy them. Placeholders use a `:name` convention:
//!
//! - `:lambda_name` — Terraform label form of the lambda name (snake_case)
//! - `:package_name` — the lambda package name as given
//! - `:source_directory` — relative path from `terraform/` to the packages
//! - `:region` — AWS region
//! - `:bucket_name` — generated unique suffix for the upload bucket
//! - `:definition` — the rendered state-machine definition (`forge sfn`)

use crate::domain::camel_to_snake;

/// Placeholder values for one lambda's Terraform scripts.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    pub lambda_name: String,
    pub package_name: String,
    pub bucket_name: String,
    pub source_directory: String,
    pub region: String,
}

impl TemplateVars {
    /// Builds the substitution set for a lambda package.
    pub fn for_lambda(lambda: &str, region: &str, source_directory: &str) -> Self {
        Self {
            lambda_name: camel_to_snake(lambda).replace('-', "_"),
            package_name: lambda.to_string(),
            bucket_name: bucket_name(),
            source_directory: source_directory.to_string(),
            region: region.to_string(),
        }
    }
}

/// Applies the placeholder substitutions to a template.
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    template
        .replace(":lambda_name", &vars.lambda_name)
        .replace(":package_name", &vars.package_name)
        .replace(":bucket_name", &vars.bucket_name)
        .replace(":source_directory", &vars.source_directory)
        .replace(":region", &vars.region)
}

/// Renders the lambda handler source for the given lambda name.
pub fn lambda_handler(lambda: &str) -> String {
    LAMBDA_HANDLER.replace(":lambda_name", lambda)
}

/// Renders the handler unit test for the given lambda name.
pub fn lambda_handler_test(lambda: &str) -> String {
    LAMBDA_HANDLER_TEST.replace(":lambda_name", lambda)
}

/// Renders a lambda `package.json` with the build/test/deploy scripts.
pub fn lambda_package_json(package_name: &str) -> String {
    LAMBDA_PACKAGE_JSON.replace(":package_name", package_name)
}

/// Renders the top-level project `package.json`.
pub fn project_package_json(package_name: &str) -> String {
    PROJECT_PACKAGE_JSON.replace(":package_name", package_name)
}

/// Generates a bucket-name suffix, two dictionary words joined by a hyphen.
pub fn bucket_name() -> String {
    const ADJECTIVES: &[&str] = &[
        "abrasive", "brash", "callous", "daft", "eccentric", "gentle", "keen", "mellow", "quick",
        "sturdy",
    ];
    const COLORS: &[&str] = &[
        "amber", "azure", "crimson", "indigo", "ivory", "jade", "ochre", "teal", "umber", "violet",
    ];

    format!(
        "{}-{}",
        ADJECTIVES[fastrand::usize(..ADJECTIVES.len())],
        COLORS[fastrand::usize(..COLORS.len())]
    )
}

/// Looks up a Terraform resource template by name.
pub fn terraform_template(name: &str) -> Option<&'static str> {
    let template = match name {
        "aws_lambda_function" => AWS_LAMBDA_FUNCTION,
        "provider" => PROVIDER,
        "variables" => VARIABLES,
        "aws_iam_role" => AWS_IAM_ROLE,
        "aws_iam_policy" => AWS_IAM_POLICY,
        "aws_iam_role_policy_attachment" => AWS_IAM_ROLE_POLICY_ATTACHMENT,
        "aws_cloudwatch_log_group" => AWS_CLOUDWATCH_LOG_GROUP,
        "aws_s3_bucket" => AWS_S3_BUCKET,
        "aws_s3_bucket_object" => AWS_S3_BUCKET_OBJECT,
        "aws_sfn_state_machine" => AWS_SFN_STATE_MACHINE,
        "aws_iam_role_sfn" => AWS_IAM_ROLE_SFN,
        "aws_iam_policy_sfn" => AWS_IAM_POLICY_SFN,
        "aws_iam_policy_document" => AWS_IAM_POLICY_DOCUMENT,
        "aws_iam_policy_document_sfn" => AWS_IAM_POLICY_DOCUMENT_SFN,
        "aws_iam_role_policy_attachment_sfn" => AWS_IAM_ROLE_POLICY_ATTACHMENT_SFN,
        _ => return None,
    };
    Some(template)
}

const LAMBDA_HANDLER: &str = "export async function :lambda_name (event) {
  console.log('Loading function', event)
}
";

const LAMBDA_HANDLER_TEST: &str = "import { :lambda_name } from '../src/handlers'
describe('Given handler', () => {
  test('should expose the lambda function handler', () => {
    expect(typeof :lambda_name).toBe('function')
  })
})
";

const LAMBDA_PACKAGE_JSON: &str = r#"{
  "name": ":package_name",
  "version": "1.0.0",
  "description": "",
  "main": "app.js",
  "scripts": {
    "coverage": "jest --coverage",
    "test": "NODE_ENV=test jest",
    "build": "babel src package.json package-lock.json --out-dir dist --copy-files && cross-env NODE_ENV=production npm install --prefix dist && zip -rXFS9 function.zip dist",
    "clean": "rimraf dist function.zip",
    "deploy": "terraform apply"
  },
  "keywords": [],
  "author": "",
  "license": "ISC"
}
"#;

const PROJECT_PACKAGE_JSON: &str = r#"{
  "name": ":package_name",
  "version": "1.0.0",
  "description": "",
  "scripts": {
    "test": "lerna run test",
    "build": "lerna run build",
    "clean": "lerna run clean",
    "cicd-init": "lerna run test && lerna run build && cd terraform && terraform init",
    "validate": "lerna test && cd terraform && terraform validate",
    "lint": "eslint packages/**/*.js --ignore-pattern 'packages/**/dist/**/*.js' --ignore-pattern 'packages/**/test/mock/*.js'"
  },
  "keywords": [],
  "author": "",
  "license": "ISC"
}
"#;

pub const LERNA_JSON: &str = r#"{
  "packages": ["packages/*"],
  "version": "0.0.1"
}
"#;

pub const BABEL_CONFIG: &str = r#"{
  "presets": [
    [
      "@babel/preset-env",
      {
        "targets": {
          "node": "12",
          "esmodules": true
        }
      }
    ]
  ],
    "plugins": [
    [
      "@babel/plugin-transform-runtime",
      {
        "corejs": 3
      }
    ]
  ]
}
"#;

pub const GITIGNORE: &str = "# Dependency directories
node_modules/
jspm_packages/

# Build output
dist/
function.zip

# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*
lerna-debug.log*

# Coverage
coverage
*.lcov
.nyc_output

# Terraform state
terraform/.terraform/
terraform/*.tfstate
terraform/*.tfstate.backup

# Environment
.env
.env.local
";

const AWS_LAMBDA_FUNCTION: &str = r#"resource "aws_lambda_function" ":lambda_name" {
  # For files larger than 10 MB, consider uploading using Amazon S3.
  # uncomment the lines in aws_s3_bucket*.tf
  # s3_bucket         = aws_s3_bucket.lambda_fn_upload.id
  # s3_key            = "lambda-fns/:package_name/function.zip"
  filename      = ":source_directory:package_name/function.zip"
  function_name = ":package_name"
  role          = aws_iam_role.lambda_fn_role.arn
  handler       = "dist/handlers.:package_name"

  source_code_hash = filebase64sha256(":source_directory:package_name/function.zip")

  runtime = "nodejs12.x"
}
"#;

const PROVIDER: &str = r#"provider "aws" {
  region     = var.aws_region
}
"#;

const VARIABLES: &str = r#"# variable "bucket" {
#   type = string
#   default = "lambda-fns-:bucket_name" # should be unique
# }

variable "aws_region" {
  type    = string
  default = ":region"
}
"#;

const AWS_IAM_ROLE: &str = r#"resource "aws_iam_role" "lambda_fn_role" {
  name = "lambda_fn_role"

  assume_role_policy = jsonencode({
    "Version" : "2012-10-17",
    "Statement" : [
      {
        "Effect" : "Allow",
        "Principal" : {
          "Service" : "lambda.amazonaws.com"
        },
        "Action" : "sts:AssumeRole"
      }
    ]
  })

}
"#;

const AWS_IAM_POLICY: &str = r#"resource "aws_iam_policy" "lambda_fn_logging" {
  name        = "lambda_fn_logging"
  path        = "/"
  description = "IAM policy for logging from a lambda"

  policy = jsonencode({
    "Version": "2012-10-17",
    "Statement": [
      {
        "Action": [
          "logs:CreateLogGroup",
          "logs:CreateLogStream",
          "logs:PutLogEvents"
        ],
        "Resource": "arn:aws:logs:*:*:*",
        "Effect": "Allow"
      }
    ]
  })
}
"#;

const AWS_IAM_ROLE_POLICY_ATTACHMENT: &str =
    r#"resource "aws_iam_role_policy_attachment" "lambda_fn_policy_logs" {
  role       = aws_iam_role.lambda_fn_role.name
  policy_arn = aws_iam_policy.lambda_fn_logging.arn
}
"#;

const AWS_CLOUDWATCH_LOG_GROUP: &str = r#"resource "aws_cloudwatch_log_group" ":lambda_name_logs" {
  name              = "/aws/lambda/:lambda_name"
  retention_in_days = 0
}
"#;

const AWS_S3_BUCKET: &str = r#"# resource "aws_s3_bucket" "lambda_fn_upload" {
#   bucket = var.bucket
#   acl    = "private"
# }
"#;

const AWS_S3_BUCKET_OBJECT: &str =
    r#"# resource "aws_s3_bucket_object" ":lambda_name_file_upload" {
#   bucket  = aws_s3_bucket.lambda_fn_upload.id
#   key     = "lambda-fns/:package_name/function.zip"
#   source  = ":source_directory:package_name/function.zip"
#   etag    = filemd5(":source_directory:package_name/function.zip")
# }
"#;

const AWS_SFN_STATE_MACHINE: &str = r#"resource "aws_sfn_state_machine" "sfn_state_machine" {
  name     = "sfn_state_machine"
  role_arn = aws_iam_role.sfn_execution.arn

  :definition
}
"#;

const AWS_IAM_ROLE_SFN: &str = r#"resource "aws_iam_role" "sfn_execution" {
  name = "sfn_execution"
  assume_role_policy = "${data.aws_iam_policy_document.sfn_assume_role.json}"
}
"#;

const AWS_IAM_POLICY_SFN: &str = r#"resource "aws_iam_policy" "sfn_lambda_invoke" {
    name = "sfn_lambda_invoke"
    policy = "${data.aws_iam_policy_document.sfn_lambda_invoke.json}"
}
"#;

const AWS_IAM_POLICY_DOCUMENT: &str = r#"data "aws_iam_policy_document" "sfn_assume_role" {
  statement {
    actions = ["sts:AssumeRole"]

    principals {
      type = "Service"
      identifiers = ["states.${var.aws_region}.amazonaws.com"]
    }
  }
}
"#;

const AWS_IAM_POLICY_DOCUMENT_SFN: &str = r#"data "aws_iam_policy_document" "sfn_lambda_invoke" {
    statement {
        actions = ["lambda:InvokeFunction"]
        resources = ["arn:aws:lambda:*:*:*"]
    }
}
"#;

const AWS_IAM_ROLE_POLICY_ATTACHMENT_SFN: &str =
    r#"resource "aws_iam_role_policy_attachment" "sfn_lambda_invoke" {
    role       = "${aws_iam_role.sfn_execution.name}"
    policy_arn = "${aws_iam_policy.sfn_lambda_invoke.arn}"
}
"#;
