//! Integration tests for scanning and processing a whole directory tree.

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

use assertables::assert_not_contains;
use removed_remover::{ProcessOptions, find_tf_files, process_dir};

mod test_support;

const MAIN_TF: &str = r#"
provider "aws" {
  region = "us-west-2"
}

resource "aws_instance" "web" {
  ami           = "ami-123456"
  instance_type = "t2.micro"
}

removed {
  from = aws_instance.old_web
  lifecycle {
    destroy = false
  }
}

resource "aws_s3_bucket" "data" {
  bucket = "my-bucket"
}
"#;

const VPC_TF: &str = r#"
resource "aws_vpc" "main" {
  cidr_block = "10.0.0.0/16"
}

removed {
  from = aws_vpc.old_main
  lifecycle {
    destroy = true
  }
}

removed {
  from = aws_subnet.old_subnet
  lifecycle {
    destroy = false
  }
}
"#;

#[test]
fn test_dir_basic_usage() -> Result<()> {
	// -- Setup & Fixtures
	let dir = test_support::new_out_dir_path("test_dir_basic_usage")?;
	let main_tf = test_support::write_file(&dir, "main.tf", MAIN_TF)?;
	let vpc_tf = test_support::write_file(&dir, "modules/networking/vpc.tf", VPC_TF)?;
	let options = ProcessOptions::default().with_normalize_whitespace(true);

	// -- Exec
	let report = process_dir(&dir, &options)?;

	// -- Check
	assert_eq!(report.files.len(), 2);
	assert!(!report.status.has_failures(), "Failures: {:#?}", report.status);
	assert_eq!(report.stats.files_processed, 2);
	assert_eq!(report.stats.files_modified, 2);
	assert_eq!(report.stats.removed_blocks_removed, 3);
	assert!(report.stats.ended_at.is_some());
	assert_not_contains!(test_support::read_file(&main_tf)?, "removed {");
	let vpc = test_support::read_file(&vpc_tf)?;
	assert_eq!(
		vpc,
		"\nresource \"aws_vpc\" \"main\" {\n  cidr_block = \"10.0.0.0/16\"\n}\n"
	);

	Ok(())
}

#[test]
fn test_dir_failing_file_does_not_stop_batch() -> Result<()> {
	// -- Setup & Fixtures
	let dir = test_support::new_out_dir_path("test_dir_failing_file_does_not_stop_batch")?;
	let broken = test_support::write_file(&dir, "a-broken.tf", "this is not valid HCL")?;
	let main_tf = test_support::write_file(&dir, "b-main.tf", MAIN_TF)?;
	let options = ProcessOptions::default();

	// -- Exec
	let report = process_dir(&dir, &options)?;

	// -- Check
	let failures: Vec<_> = report.status.failures().collect();
	assert_eq!(failures.len(), 1);
	assert!(failures[0].file_path().ends_with("a-broken.tf"));
	assert!(failures[0].error_msg().is_some_and(|msg| msg.contains("a-broken.tf")));
	assert_eq!(report.stats.files_processed, 1);
	assert_eq!(report.stats.removed_blocks_removed, 1);
	assert_eq!(test_support::read_file(&broken)?, "this is not valid HCL");
	assert_not_contains!(test_support::read_file(&main_tf)?, "removed {");

	Ok(())
}

#[test]
fn test_dir_dry_run_counts_without_writing() -> Result<()> {
	// -- Setup & Fixtures
	let dir = test_support::new_out_dir_path("test_dir_dry_run_counts_without_writing")?;
	let main_tf = test_support::write_file(&dir, "main.tf", MAIN_TF)?;
	let options = ProcessOptions::default().with_dry_run(true);

	// -- Exec
	let report = process_dir(&dir, &options)?;

	// -- Check
	assert!(report.stats.dry_run);
	assert_eq!(report.stats.files_modified, 1);
	assert_eq!(report.stats.removed_blocks_removed, 1);
	assert_eq!(test_support::read_file(&main_tf)?, MAIN_TF);

	Ok(())
}

#[test]
fn test_dir_missing_root_is_error() -> Result<()> {
	// -- Exec
	let res = find_tf_files("tests/.out/non-existent-dir");

	// -- Check
	assert!(res.is_err());

	Ok(())
}
