//! Common source code fixtures for tests.

/// A small program exercising MAP, global data, a procedure and a routine.
///
/// Line numbers matter: fold tests refer to them.
pub const ORDER_PROGRAM: &str = "  PROGRAM

  MAP
    MODULE('util.clw')
      Helper(LONG pCount),STRING
    END
    Main PROCEDURE
  END

Counter     LONG
Totals      GROUP,PRE(TOT)
Amount        DECIMAL(9,2)
Items         LONG
            END
OrderQ      QUEUE
Id            LONG
            END

  CODE
  Main()

Main PROCEDURE
i           LONG
  CODE
  LOOP i = 1 TO 10
    IF i % 2 = 0
      Counter += 1
    ELSE
      DO Report
    END
  END
  CASE Counter
  OF 1
    RETURN
  OROF 2 TO 5
    Totals.Items = Counter * 2
  ELSE
    EXIT
  END

Report ROUTINE
  Counter = 0
";

/// A FILE with a key and a record, and a window with nested controls.
pub const FILE_AND_WINDOW: &str = "  MEMBER('app')
Customers   FILE,DRIVER('TOPSPEED'),PRE(Cus)
CustKey       KEY(+Cus:Id),NOCASE
Record        RECORD
Id              LONG
Name            STRING(40)
              END
            END

Browse      WINDOW('Customers'),AT(,,200,100)
              MENUBAR
                MENU('&File')
                  ITEM('E&xit'),USE(?Exit)
                END
              END
              SHEET,AT(4,4,190,80)
                TAB('General')
                  BUTTON('OK'),USE(?OkBtn)
                END
              END
            END
";

/// Class declaration with overloaded methods.
pub const CLASS_DECLARATION: &str = "\
MyClass     CLASS(BaseClass),TYPE,MODULE('MyClass.clw')
AddLine       PROCEDURE(STRING pValue)
AddLine       PROCEDURE(*STRING pValue)
Process       PROCEDURE()
Process       PROCEDURE(STRING s, LONG n)
            END
";

/// Implementations matching [`CLASS_DECLARATION`].
///
/// `AddLine(STRING)` is on line 1, `AddLine(*STRING)` on line 4.
pub const CLASS_IMPLEMENTATION: &str = "  MEMBER('app')
MyClass.AddLine PROCEDURE(STRING pValue)
  CODE

MyClass.AddLine PROCEDURE(*STRING pValue)
  CODE
  SELF.Process(pValue, 1)

MyClass.Process PROCEDURE()
  CODE

MyClass.Process PROCEDURE(STRING s, LONG n)
  CODE
  PARENT.Process()
";
