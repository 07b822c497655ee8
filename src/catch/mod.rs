pub use self::reconstructor::CatchReconstructor;

mod reconstructor;
