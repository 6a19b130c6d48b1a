//! 核心宏定义
//!
//! 提供统一的宏来减少配置结构体的样板代码

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use linalg_script::impl_default;
///
/// struct Viewport {
///     width: u32,
///     title: String,
/// }
///
/// impl_default!(Viewport {
///     width: 640,
///     title: String::from("viewport"),
/// });
///
/// assert_eq!(Viewport::default().width, 640);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 同时实现Default和new()的宏
///
/// `new()` 与 `default()` 返回相同的值。
#[macro_export]
macro_rules! impl_default_and_new {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        $crate::impl_default!($struct_name { $($field: $value),* });

        impl $struct_name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}
