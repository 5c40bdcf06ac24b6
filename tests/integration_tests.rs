// Parser robustness tests for the Monkey parser
//
// Every input is run under `catch_unwind`, so malformed programs that crash the
// parser are reported separately from ones that merely produce the wrong
// diagnostics.

use monkey::ast::Program;
use monkey::error::ParseError;
use monkey::parser::parse;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ✓ {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  ✗ {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  💥 {}: CRASHED - {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

/// Run a single test case
fn run_single_test(test: &TestCase) -> TestResult {
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(_), false) => {
                TestResult::Fail("Expected parsing to fail, but it succeeded".to_string())
            }
            (Err(errors), false) => match &test.expected_error_contains {
                Some(expected) if !errors.iter().any(|e| e.message.contains(expected)) => {
                    TestResult::Fail(format!(
                        "No error message contains '{}', got {:?}",
                        expected,
                        messages(&errors)
                    ))
                }
                _ => TestResult::Pass,
            },
            (Err(errors), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got errors: {:?}",
                messages(&errors)
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

fn messages(errors: &[ParseError]) -> Vec<&str> {
    errors.iter().map(|e| e.message.as_str()).collect()
}

/// Parse input, failing when any syntax error was collected
fn parse_input(input: &str) -> Result<Program, Vec<ParseError>> {
    let (program, errors) = parse(input);
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_malformed_expressions_tests() -> TestSuite {
    let mut suite = TestSuite::new("Malformed Expressions");

    // === PARENTHESES TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2",
        "expected next token to be ), got EOF instead",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "((1 + 2)",
        "expected next token to be ), got EOF instead",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2)",
        "no prefix parse function for ) found",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "()",
        "no prefix parse function for ) found",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses_in_expression",
        "1 + ()",
        "no prefix parse function for ) found",
    ));

    // === BRACKET TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_bracket",
        "[1, 2",
        "expected next token to be ], got EOF instead",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "mismatched_paren_bracket",
        "[1 + (2 * 3]",
        "expected next token to be ), got ] instead",
    ));

    // === BRACE TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "bare_block",
        "{ let x = 1 }",
        "no prefix parse function for { found",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_brace",
        "let x = 1 }",
        "no prefix parse function for } found",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unclosed_block",
        "if (x) { 5",
        "expected next token to be }, got EOF instead",
    ));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));
    suite.add_test(TestCase::should_fail_with_message(
        "empty_statement",
        ";",
        "no prefix parse function for ; found",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unexpected_eof_after_operator",
        "1 +",
        "no prefix parse function for EOF found",
    ));
    suite.add_test(TestCase::should_fail("unexpected_eof_in_expression", "1 + ("));

    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));

    let deep_arrays = "[".repeat(100) + &"]".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_arrays", &deep_arrays));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    // Missing operands
    suite.add_test(TestCase::should_fail("missing_left_operand", "+ 1"));
    suite.add_test(TestCase::should_fail("missing_right_operand", "1 +"));
    suite.add_test(TestCase::should_fail("missing_both_operands", "+"));

    suite.add_test(TestCase::should_fail("double_plus", "1 ++ 2"));
    // `-` and `!` are also prefix operators
    suite.add_test(TestCase::should_succeed("double_minus", "1 -- 2"));
    suite.add_test(TestCase::should_succeed("mixed_operators", "1 +- 2"));
    suite.add_test(TestCase::should_succeed("double_bang", "!!true"));

    suite.add_test(TestCase::should_succeed("comparison_equal", "1 == 2"));
    suite.add_test(TestCase::should_succeed("comparison_not_equal", "1 != 2"));
    suite.add_test(TestCase::should_succeed("comparison_less", "1 < 2"));
    suite.add_test(TestCase::should_succeed("comparison_greater", "1 > 2"));

    suite.add_test(TestCase::should_fail_with_message(
        "unknown_operator",
        "1 % 2",
        "no prefix parse function for ILLEGAL found",
    ));

    suite
}

fn create_control_flow_tests() -> TestSuite {
    let mut suite = TestSuite::new("Control Flow Tests");

    suite.add_test(TestCase::should_succeed("valid_if", "if (true) { 1 }"));
    suite.add_test(TestCase::should_succeed("valid_if_else", "if (x < y) { x } else { y }"));
    suite.add_test(TestCase::should_succeed("empty_branches", "if (x) {} else {}"));

    suite.add_test(TestCase::should_fail_with_message(
        "if_missing_condition",
        "if { 1 }",
        "expected next token to be (, got { instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "if_missing_body",
        "if (true)",
        "expected next token to be {, got EOF instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "else_missing_body",
        "if (true) { 1 } else",
        "expected next token to be {, got EOF instead",
    ));

    suite.add_test(TestCase::should_succeed("return_value", "return 5"));
    suite.add_test(TestCase::should_fail_with_message(
        "return_without_value",
        "return;",
        "no prefix parse function for ; found",
    ));

    suite
}

fn create_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Literal Tests");

    suite.add_test(TestCase::should_succeed("integer_literal", "42"));
    suite.add_test(TestCase::should_succeed("float_literal", "3.14"));
    suite.add_test(TestCase::should_succeed("string_literal", "\"hello\""));
    suite.add_test(TestCase::should_succeed("boolean_true", "true"));
    suite.add_test(TestCase::should_succeed("boolean_false", "false"));

    // Any run of digits and dots is one number token
    suite.add_test(TestCase::should_fail_with_message(
        "multiple_dots",
        "3.14.159",
        "no prefix parse function for ILLEGAL found",
    ));
    suite.add_test(TestCase::should_succeed("trailing_dot", "42."));
    suite.add_test(TestCase::should_succeed("leading_dot", ".42"));
    suite.add_test(TestCase::should_fail_with_message(
        "lone_dot",
        ".",
        "could not parse . as float",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "integer_overflow",
        "9223372036854775808",
        "could not parse 9223372036854775808 as integer",
    ));

    // Strings run to the end of input when the closing quote is missing
    suite.add_test(TestCase::should_succeed("unterminated_string", "\"hello"));
    suite.add_test(TestCase::should_succeed(
        "unterminated_string_with_newline",
        "\"hello\nworld",
    ));

    suite
}

fn create_let_tests() -> TestSuite {
    let mut suite = TestSuite::new("Let Tests");

    suite.add_test(TestCase::should_succeed("simple_let", "let x = 1"));
    suite.add_test(TestCase::should_succeed("let_with_expression", "let x = 1 + 2;"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_value",
        "let x =",
        "no prefix parse function for EOF found",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_name",
        "let = 1",
        "expected next token to be IDENT, got = instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "invalid_target",
        "let 1 = x",
        "expected next token to be IDENT, got INT instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_assign",
        "let x 1",
        "expected next token to be =, got INT instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "assignment_without_let",
        "x = 1",
        "no prefix parse function for = found",
    ));

    suite
}

fn create_function_tests() -> TestSuite {
    let mut suite = TestSuite::new("Function Tests");

    suite.add_test(TestCase::should_succeed("function_literal", "fn(x, y) { x + y }"));
    suite.add_test(TestCase::should_succeed("no_parameters", "fn() {}"));
    suite.add_test(TestCase::should_succeed("immediate_call", "fn(x) { x }(1)"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_parameter_paren",
        "fn(x, y { x }",
        "expected next token to be ), got { instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trailing_parameter_comma",
        "fn(x,) {}",
        "expected next token to be IDENT, got ) instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_parameter_list",
        "fn x { x }",
        "expected next token to be (, got IDENT instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "literal_parameter",
        "fn(1) { 1 }",
        "expected next token to be IDENT, got INT instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unclosed_body",
        "fn(x) { x",
        "expected next token to be }, got EOF instead",
    ));

    suite
}

fn create_function_call_tests() -> TestSuite {
    let mut suite = TestSuite::new("Function Call Tests");

    suite.add_test(TestCase::should_succeed("simple_function_call", "foo()"));
    suite.add_test(TestCase::should_succeed("function_call_with_args", "foo(1, 2, 3)"));
    suite.add_test(TestCase::should_succeed("chained_calls", "add(1, 2)(3)"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_closing_paren",
        "foo(1, 2",
        "expected next token to be ), got EOF instead",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_opening_paren",
        "foo 1, 2)",
        "no prefix parse function for , found",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trailing_comma",
        "foo(1, 2,)",
        "no prefix parse function for ) found",
    ));

    suite
}

fn create_positive_tests() -> TestSuite {
    let mut suite = TestSuite::new("Positive Tests");

    // These tests verify that valid syntax still parses correctly
    suite.add_test(TestCase::should_succeed("simple_arithmetic", "1 + 2 * 3"));
    suite.add_test(TestCase::should_succeed("parentheses", "(1 + 2) * 3"));
    suite.add_test(TestCase::should_succeed("string_concatenation", "\"hello\" + \" world\""));
    suite.add_test(TestCase::should_succeed("arrays", "[1, [2, 3], \"four\", fn() { 5 }]"));
    suite.add_test(TestCase::should_succeed(
        "closure",
        "let newAdder = fn(x) { fn(y) { x + y } }; newAdder(2)(3);",
    ));
    suite.add_test(TestCase::should_succeed(
        "recursion",
        "let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) }; fib(10)",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    println!("🧪 Monkey Parser Robustness Test Suite");
    println!("======================================\n");

    let suites = vec![
        create_malformed_expressions_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_control_flow_tests(),
        create_literal_tests(),
        create_let_tests(),
        create_function_tests(),
        create_function_call_tests(),
        create_positive_tests(),
    ];

    let mut failing_suites = Vec::new();
    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            failing_suites.push(results.suite_name);
        }
    }

    assert!(
        failing_suites.is_empty(),
        "failing suites: {:?}",
        failing_suites
    );
}
