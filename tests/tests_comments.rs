//! Comments around a `removed` block belong to whatever follows them, so they must survive.

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

use assertables::{assert_contains, assert_not_contains};
use removed_remover::{ProcessOptions, Stats, compute_edit, process_file};

mod test_support;

const RESOURCE_WEB: &str = r#"resource "aws_instance" "web" {
  ami           = "ami-123456"
  instance_type = "t2.micro"
}
"#;

const REMOVED_OLD: &str = r#"removed {
  from = aws_instance.old
  lifecycle {
    destroy = false
  }
}
"#;

fn run_on_disk(prefix: &str, input: &str) -> Result<String> {
	let dir = test_support::new_out_dir_path(prefix)?;
	let file = test_support::write_file(&dir, "main.tf", input)?;
	let options = ProcessOptions::default();
	process_file(&file, &options, &mut Stats::new(&options))?;
	test_support::read_file(&file)
}

#[test]
fn test_comments_directly_before_removed_block() -> Result<()> {
	// -- Setup & Fixtures
	let input = format!("{RESOURCE_WEB}\n# This comment describes the resource removal\n{REMOVED_OLD}");

	// -- Exec
	let result = run_on_disk("test_comments_directly_before_removed_block", &input)?;

	// -- Check
	assert_not_contains!(result, "removed {");
	assert_eq!(
		result,
		format!("{RESOURCE_WEB}\n# This comment describes the resource removal\n")
	);

	Ok(())
}

#[test]
fn test_comments_multiple_lines_before_removed_block() -> Result<()> {
	// -- Setup & Fixtures
	let input = format!("{RESOURCE_WEB}\n# Description of the removal\n# reason: no longer needed\n{REMOVED_OLD}");

	// -- Exec
	let result = run_on_disk("test_comments_multiple_lines_before_removed_block", &input)?;

	// -- Check
	assert_not_contains!(result, "removed {");
	assert_contains!(result, "# Description of the removal\n# reason: no longer needed\n");

	Ok(())
}

#[test]
fn test_comments_separated_by_blank_line() -> Result<()> {
	// -- Setup & Fixtures
	let input = format!("{RESOURCE_WEB}\n# This comment is separated by a blank line\n\n{REMOVED_OLD}");

	// -- Exec
	let result = run_on_disk("test_comments_separated_by_blank_line", &input)?;

	// -- Check
	assert_contains!(result, "# This comment is separated by a blank line");

	Ok(())
}

#[test]
fn test_comments_between_removed_and_resource() -> Result<()> {
	// -- Setup & Fixtures
	let input = format!(
		"{RESOURCE_WEB}\n# Describes the S3 bucket below\n{REMOVED_OLD}\nresource \"aws_s3_bucket\" \"data\" {{\n  bucket = \"my-data-bucket\"\n}}\n"
	);

	// -- Exec
	let result = run_on_disk("test_comments_between_removed_and_resource", &input)?;

	// -- Check
	assert_not_contains!(result, "removed {");
	assert_contains!(result, "# Describes the S3 bucket below\n\nresource \"aws_s3_bucket\" \"data\" {");

	Ok(())
}

#[test]
fn test_comments_inside_removed_block_go_with_it() -> Result<()> {
	// -- Setup & Fixtures
	let input = "# keep me\nremoved {\n  # drop me\n  from = aws_instance.old\n}\n";

	// -- Exec
	let edit = compute_edit("inline.tf", input.as_bytes(), &ProcessOptions::default())?;

	// -- Check
	let content = String::from_utf8(edit.content)?;
	assert_eq!(content, "# keep me\n");

	Ok(())
}

#[test]
fn test_comments_byte_identical_with_odd_text() -> Result<()> {
	// -- Setup & Fixtures
	let comment = "// Ünïcode & symbols: {not a block} \"quoted\"";
	let input = format!("{comment}\n{REMOVED_OLD}");

	// -- Exec
	let edit = compute_edit("odd.tf", input.as_bytes(), &ProcessOptions::default())?;

	// -- Check
	assert_eq!(String::from_utf8(edit.content)?, format!("{comment}\n"));

	Ok(())
}
