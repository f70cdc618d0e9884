#[cfg(test)]
mod scanner_tests {
    use rulox as lox;

    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_are_russian() {
        assert_token_sequence(
            "переменная x = пусто; если (правда и ложь) вывести это;",
            &[
                (TokenType::VAR, "переменная"),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "пусто"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IF, "если"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::TRUE, "правда"),
                (TokenType::AND, "и"),
                (TokenType::FALSE, "ложь"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::PRINT, "вывести"),
                (TokenType::THIS, "это"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_english_keywords_are_identifiers() {
        assert_token_sequence(
            "var print",
            &[
                (TokenType::IDENTIFIER, "var"),
                (TokenType::IDENTIFIER, "print"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_cyrillic_identifiers() {
        assert_token_sequence(
            "счётчик2 _Ёлка иначеЕсли",
            &[
                (TokenType::IDENTIFIER, "счётчик2"),
                (TokenType::IDENTIFIER, "_Ёлка"),
                (TokenType::IDENTIFIER, "иначеЕсли"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_06_trailing_dot_is_separate() {
        let tokens: Vec<Token> = Scanner::new("123.").filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token_type, TokenType::NUMBER(0.0));
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[0].literal(), "123.0");
        assert_eq!(tokens[1].token_type, TokenType::DOT);
        assert_eq!(tokens[2].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_07_number_literals() {
        let tokens: Vec<Token> = Scanner::new("2.5 42").filter_map(Result::ok).collect();

        match tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 2.5),
            ref other => panic!("expected number, got {:?}", other),
        }
        assert_eq!(tokens[0].to_string(), "NUMBER 2.5 2.5");
        assert_eq!(tokens[1].to_string(), "NUMBER 42 42.0");
    }

    #[test]
    fn test_scanner_08_string_literal_spans_lines() {
        let tokens: Vec<Token> = Scanner::new("\"при\nвет\" x")
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "при\nвет"),
            other => panic!("expected string, got {:?}", other),
        }
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_scanner_09_comments_and_lines() {
        let tokens: Vec<Token> = Scanner::new("// пропуск\n\n1 // ещё\n2")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].line, 3);
        assert_eq!(tokens[1].line, 4);
        assert_eq!(tokens[2].token_type, TokenType::EOF);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }
    }

    #[test]
    fn test_unexpected_non_letter_unicode() {
        let (tokens, errors) = scan_tokens("1 № 2");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character.");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = scan_tokens("вывести \"без конца\n");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 2] Error: Unterminated string."
        );
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, TokenType::PRINT);
        assert_eq!(tokens[1].token_type, TokenType::EOF);
    }

    #[test]
    fn test_exactly_one_eof() {
        let mut scanner = Scanner::new("");

        assert_token_matches(&scanner.next().unwrap(), TokenType::EOF, "");
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_token_json() {
        let token = Token::new(TokenType::IDENTIFIER, "имя", 7);
        let json = serde_json::to_string(&token).unwrap();

        assert_eq!(
            json,
            r#"{"token_type":"IDENTIFIER","lexeme":"имя","line":7}"#
        );
    }

    fn assert_token_matches(result: &lox::Result<Token>, expected_type: TokenType, lexeme: &str) {
        match result {
            Ok(token) => {
                assert_eq!(token.token_type, expected_type);
                assert_eq!(token.lexeme, lexeme);
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }
}
