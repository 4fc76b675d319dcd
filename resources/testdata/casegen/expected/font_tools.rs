// This file was auto-generated by `casegen`, do not edit manually.

#![allow(non_snake_case)]

use crate::*;

#[test] fn noto_sans_regular_1_test_font_tools() {test_font_tools("NotoSans-Regular.ttf", "1,2,3", 1)}
#[test] fn noto_sans_regular_2_test_font_tools() {test_font_tools("NotoSans-Regular.ttf", "10-30", 2)}
#[test] fn new_c_m_math_regular_1_test_font_tools() {test_font_tools("NewCMMath-Regular.otf", "*", 1)}
